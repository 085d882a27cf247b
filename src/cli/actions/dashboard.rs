use crate::{
    cli::{actions::print_json, globals::GlobalArgs},
    views::dashboard,
};
use anyhow::Result;

/// # Errors
/// Returns an error if no token is stored or the client cannot be built.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let client = globals.client()?;
    let token = globals.token()?;

    let stats = dashboard::load(&client, &token).await;

    if globals.json {
        return print_json(&stats);
    }
    println!("{}", dashboard::greeting(&stats));
    println!("{}", dashboard::render(&stats));
    Ok(())
}
