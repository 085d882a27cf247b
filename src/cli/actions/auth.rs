use crate::{
    cli::{
        actions::{print_json, print_message},
        globals::GlobalArgs,
    },
    features::{
        auth::{self, LoginInput, RegisterInput, ResetPasswordInput},
        users::User,
    },
    format::initial,
};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub enum Args {
    Login(LoginInput),
    Register(RegisterInput),
    Logout,
    Whoami,
    ForgotPassword { email: String },
    ResetPassword(ResetPasswordInput),
    SendVerificationEmail,
    VerifyEmail,
    VerifyEmailLink { id: String, hash: String },
    ResendEmailVerification,
}

/// # Errors
/// Returns an error if the request fails or the token file cannot be updated.
pub async fn execute(globals: &GlobalArgs, args: Args) -> Result<()> {
    let client = globals.client()?;
    let store = globals.store();

    match args {
        Args::Login(input) => {
            let user = auth::login(&client, &store, &input).await?;
            info!(path = %store.path().display(), "signed in");
            signed_in(globals, user.as_ref(), "Logged in")
        }
        Args::Register(input) => {
            let user = auth::register(&client, &store, &input).await?;
            info!(path = %store.path().display(), "registered");
            signed_in(globals, user.as_ref(), "Account created")
        }
        Args::Logout => {
            let message = auth::logout(&client, &store).await?;
            print_message(globals, message, "Logged out")
        }
        Args::Whoami => match auth::check_session(&client, &store).await? {
            Some(user) => show_user(globals, &user),
            None => print_message(globals, None, "Not logged in"),
        },
        Args::ForgotPassword { email } => {
            let message = auth::forgot_password(&client, &email).await?;
            print_message(globals, message, "Password reset email sent")
        }
        Args::ResetPassword(input) => {
            let message = auth::reset_password(&client, &input).await?;
            print_message(globals, message, "Password has been reset")
        }
        Args::SendVerificationEmail => {
            let token = globals.token()?;
            let message = auth::send_verification_email(&client, &token).await?;
            print_message(globals, message, "Verification email sent")
        }
        Args::VerifyEmail => {
            let token = globals.token()?;
            let message = auth::verify_email(&client, &token).await?;
            print_message(globals, message, "Email verified")
        }
        Args::VerifyEmailLink { id, hash } => {
            let message = auth::verify_email_link(&client, &id, &hash).await?;
            print_message(globals, message, "Email verified")
        }
        Args::ResendEmailVerification => {
            let token = globals.token()?;
            let message = auth::resend_email_verification(&client, &token).await?;
            print_message(globals, message, "Verification email sent")
        }
    }
}

fn signed_in(globals: &GlobalArgs, user: Option<&User>, fallback: &str) -> Result<()> {
    match user {
        Some(user) => show_user(globals, user),
        None => print_message(globals, None, fallback),
    }
}

fn show_user(globals: &GlobalArgs, user: &User) -> Result<()> {
    if globals.json {
        return print_json(user);
    }
    println!("[{}] {} <{}>", initial(&user.name), user.name, user.email);
    if !user.is_verified() {
        println!("Email not verified. Run `siswa email resend` to get a new link.");
    }
    Ok(())
}
