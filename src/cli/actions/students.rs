use crate::{
    cli::{
        actions::{ensure_confirmed, print_json, print_message, Paging},
        globals::GlobalArgs,
    },
    features::siswa::{self, Student, StudentInput},
    views::{
        self,
        students::{StudentFilter, StudentRow},
    },
};
use anyhow::Result;

/// Fields given on `students update`; anything left out keeps its current value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub nisns: Option<String>,
    pub hobbies: Option<Vec<u64>>,
    pub toggle_hobbies: Vec<u64>,
}

impl StudentChanges {
    #[must_use]
    pub fn apply(self, mut input: StudentInput) -> StudentInput {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(phone) = self.phone {
            input.phone = phone;
        }
        if let Some(nisns) = self.nisns {
            input.nisns = nisns;
        }
        if let Some(hobbies) = self.hobbies {
            input.hobbies = hobbies;
        }
        for id in self.toggle_hobbies {
            input.toggle_hobby(id);
        }
        input
    }
}

#[derive(Debug)]
pub enum Args {
    List {
        filter: StudentFilter,
        paging: Option<Paging>,
    },
    Show {
        id: u64,
    },
    Create(StudentInput),
    Update {
        id: u64,
        changes: StudentChanges,
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
        ensure_confirmed(*confirmed, &format!("student {id}"))?;
    }

    let client = globals.client()?;
    let token = globals.token()?;

    match args {
        Args::List { filter, paging } => {
            let students = siswa::list(&client, &token).await?;
            let rows: Vec<StudentRow> = views::students::filter(&students, &filter)
                .into_iter()
                .map(StudentRow::from)
                .collect();
            let shown = match paging {
                Some(paging) => views::paginate(&rows, paging.page, paging.per_page),
                None => &rows[..],
            };

            if globals.json {
                return print_json(shown);
            }
            if rows.is_empty() {
                let (title, hint) = views::students::empty_state(&filter);
                println!("{title}\n{hint}");
                return Ok(());
            }
            println!("{}", views::students::render(shown));
            if let Some(paging) = paging {
                println!("{}", paging.footer(rows.len()));
            }
            Ok(())
        }
        Args::Show { id } => {
            let student = siswa::get(&client, &token, id).await?;
            show(globals, &student)
        }
        Args::Create(input) => {
            let created = siswa::create(&client, &token, &input).await?;
            show(globals, &created)
        }
        Args::Update { id, changes } => {
            let current = siswa::get(&client, &token, id).await?;
            let input = changes.apply(StudentInput::from_student(&current));
            let updated = siswa::update(&client, &token, id, &input).await?;
            show(globals, &updated)
        }
        Args::Delete { id, .. } => {
            let message = siswa::delete(&client, &token, id).await?;
            print_message(globals, message, "Student deleted")
        }
    }
}

fn show(globals: &GlobalArgs, student: &Student) -> Result<()> {
    if globals.json {
        return print_json(student);
    }
    println!("{}", views::students::render(&[StudentRow::from(student)]));
    Ok(())
}
