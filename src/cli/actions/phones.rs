use crate::{
    cli::{
        actions::{print_json, Paging},
        globals::GlobalArgs,
    },
    features::phone,
    format::{format_phone_number, NOT_AVAILABLE},
    views,
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub paging: Option<Paging>,
}

/// # Errors
/// Returns an error if no token is stored or the request fails.
pub async fn execute(globals: &GlobalArgs, args: Args) -> Result<()> {
    let client = globals.client()?;
    let token = globals.token()?;

    let phones = phone::list(&client, &token).await?;
    let shown = match args.paging {
        Some(paging) => views::paginate(&phones, paging.page, paging.per_page),
        None => &phones[..],
    };

    if globals.json {
        return print_json(shown);
    }
    if phones.is_empty() {
        println!("No phone numbers yet");
        return Ok(());
    }

    let mut table = views::table(["ID", "Number", "Formatted", "Student ID"]);
    for phone in shown {
        table.add_row(vec![
            phone.id.to_string(),
            phone.number_phone.clone(),
            format_phone_number(&phone.number_phone),
            phone
                .siswa_id
                .map_or_else(|| NOT_AVAILABLE.to_string(), |id| id.to_string()),
        ]);
    }
    println!("{table}");
    if let Some(paging) = args.paging {
        println!("{}", paging.footer(phones.len()));
    }
    Ok(())
}
