use crate::{
    api::Page,
    cli::{
        actions::{ensure_confirmed, print_json, print_message},
        globals::GlobalArgs,
    },
    features::users::{self, User, UserInput},
    views,
};
use anyhow::Result;
use secrecy::SecretString;

/// Fields given on `users update`. Passwords are only sent when given.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub password_confirmation: Option<SecretString>,
}

impl UserChanges {
    #[must_use]
    pub fn apply(self, mut input: UserInput) -> UserInput {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(email) = self.email {
            input.email = email;
        }
        input.password = self.password;
        input.password_confirmation = self.password_confirmation;
        input
    }
}

#[derive(Debug)]
pub enum Args {
    List { page: u32 },
    Search { query: String, page: u32 },
    Show { id: u64 },
    Create(UserInput),
    Update { id: u64, changes: UserChanges },
    Delete { id: u64, confirmed: bool },
}

/// # Errors
/// Returns an error if no token is stored, validation fails or the request fails.
pub async fn execute(globals: &GlobalArgs, args: Args) -> Result<()> {
    if let Args::Delete { id, confirmed } = &args {
        ensure_confirmed(*confirmed, &format!("user {id}"))?;
    }

    let client = globals.client()?;
    let token = globals.token()?;

    match args {
        Args::List { page } => {
            let page = users::list(&client, &token, page).await?;
            show_page(globals, &page, None)
        }
        Args::Search { query, page } => {
            let page = users::search(&client, &token, &query, page).await?;
            show_page(globals, &page, Some(&query))
        }
        Args::Show { id } => {
            let user = users::get(&client, &token, id).await?;
            show(globals, &user)
        }
        Args::Create(input) => {
            let created = users::create(&client, &token, &input).await?;
            show(globals, &created)
        }
        Args::Update { id, changes } => {
            let current = users::get(&client, &token, id).await?;
            let input = changes.apply(UserInput::from_user(&current));
            let updated = users::update(&client, &token, id, &input).await?;
            show(globals, &updated)
        }
        Args::Delete { id, .. } => {
            let message = users::delete(&client, &token, id).await?;
            print_message(globals, message, "User deleted")
        }
    }
}

fn show_page(globals: &GlobalArgs, page: &Page<User>, query: Option<&str>) -> Result<()> {
    if globals.json {
        return print_json(page);
    }
    if page.items.is_empty() {
        println!("{}", views::users::empty_state(query));
    } else {
        println!("{}", views::users::render(page));
    }
    println!("{}", views::users::footer(&page.pagination));
    Ok(())
}

fn show(globals: &GlobalArgs, user: &User) -> Result<()> {
    if globals.json {
        return print_json(user);
    }
    let page = Page {
        items: vec![user.clone()],
        pagination: Default::default(),
    };
    println!("{}", views::users::render(&page));
    Ok(())
}
