use crate::{
    cli::{
        actions::{ensure_confirmed, print_json, print_message, Paging},
        globals::GlobalArgs,
    },
    features::hobby::{self, HobbyInput},
    views::{self, hobbies::HobbyRow},
};
use anyhow::Result;

#[derive(Debug)]
pub enum Args {
    List {
        search: String,
        paging: Option<Paging>,
    },
    Create(HobbyInput),
    Update {
        id: u64,
        input: HobbyInput,
    },
    Delete {
        id: u64,
        confirmed: bool,
    },
}

/// # Errors
/// Returns an error if no token is stored, validation fails or the request fails.
pub async fn execute(globals: &GlobalArgs, args: Args) -> Result<()> {
    if let Args::Delete { id, confirmed } = &args {
        ensure_confirmed(*confirmed, &format!("hobby {id}"))?;
    }

    let client = globals.client()?;
    let token = globals.token()?;

    match args {
        Args::List { search, paging } => {
            let hobbies = hobby::list(&client, &token).await?;
            let rows: Vec<HobbyRow> = views::hobbies::filter(&hobbies, &search)
                .into_iter()
                .map(HobbyRow::from)
                .collect();
            let shown = match paging {
                Some(paging) => views::paginate(&rows, paging.page, paging.per_page),
                None => &rows[..],
            };

            if globals.json {
                return print_json(shown);
            }
            if rows.is_empty() {
                let (title, hint) = views::hobbies::empty_state(&search);
                println!("{title}\n{hint}");
                return Ok(());
            }
            println!("{}", views::hobbies::render(shown));
            if let Some(paging) = paging {
                println!("{}", paging.footer(rows.len()));
            }
            Ok(())
        }
        Args::Create(input) => {
            let created = hobby::create(&client, &token, &input).await?;
            show(globals, &created, "Hobby created")
        }
        Args::Update { id, input } => {
            let updated = hobby::update(&client, &token, id, &input).await?;
            show(globals, &updated, "Hobby updated")
        }
        Args::Delete { id, .. } => {
            let message = hobby::delete(&client, &token, id).await?;
            print_message(globals, message, "Hobby deleted")
        }
    }
}

fn show(globals: &GlobalArgs, hobby: &hobby::Hobby, headline: &str) -> Result<()> {
    if globals.json {
        return print_json(hobby);
    }
    println!("{headline}: {} (id {})", hobby.name, hobby.id);
    Ok(())
}
