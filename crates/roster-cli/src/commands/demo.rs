//! Roster walkthrough command
//!
//! Usage: roster demo [--json]
//!
//! Bootstraps the store, inserts the two example students in one batch,
//! runs the read queries, bumps every grade, deletes Albert Einstein and
//! looks him up again.

use clap::Args;
use roster_core::model::{sample_students, OrNone};
use roster_core::{SortDirection, Student, StudentColumn};
use roster_store::db::bootstrap;
use roster_store::repo::NameAndBirthday;
use roster_store::{StoreTarget, StudentQuery, StudentRepo};
use rusqlite::Connection;
use serde::Serialize;

const DELETED_NAME: &str = "Albert Einstein";

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Print the results as one JSON document instead of text
    #[arg(long)]
    pub json: bool,
}

/// Everything the walkthrough observed, step by step
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub inserted_ids: Vec<i64>,
    pub all_students: Vec<Student>,
    pub names: Vec<Option<String>>,
    pub names_by_name: Vec<Option<String>>,
    pub top_grade_limit_1: Vec<NameAndBirthday>,
    pub top_grade_first: Option<NameAndBirthday>,
    pub student_count: i64,
    pub alan_in_grade_11: Vec<Student>,
    pub grades_incremented: usize,
    pub grades_after_update: Vec<(Option<String>, Option<i64>)>,
    pub deleted_id: Option<i64>,
    pub after_delete: Option<Student>,
}

/// Execute the walkthrough against `db`
pub fn execute(db: &str, args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let target: StoreTarget = db.parse()?;
    let mut conn = bootstrap(&target)?;

    let report = run(&mut conn)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&target, &report);
    }

    Ok(())
}

/// Run every walkthrough step in order against a migrated connection
pub fn run(conn: &mut Connection) -> roster_store::Result<DemoReport> {
    let inserted_ids = StudentRepo::insert_many(conn, &sample_students())?;

    let all_students = StudentQuery::new().all(conn)?;
    let names = StudentQuery::new().names(conn)?;
    let names_by_name = StudentQuery::new()
        .order_by(StudentColumn::Name, SortDirection::Asc)
        .names(conn)?;

    let by_grade = StudentQuery::new().order_by(StudentColumn::Grade, SortDirection::Desc);
    let top_grade_limit_1 = by_grade.clone().limit(1).names_and_birthdays(conn)?;
    let top_grade_first = by_grade.first_name_and_birthday(conn)?;

    let student_count = StudentQuery::new().count(conn)?;
    let alan_in_grade_11 = StudentQuery::new()
        .name_contains("Alan")
        .grade_eq(11)
        .all(conn)?;

    let grades_incremented = StudentQuery::new().increment_grade(conn)?;
    let grades_after_update = StudentRepo::list_all(conn)?
        .into_iter()
        .map(|s| (s.name, s.grade))
        .collect();

    let delete_query = StudentQuery::new().name_eq(DELETED_NAME);
    let deleted_id = match delete_query.first(conn)? {
        Some(student) => {
            StudentRepo::delete(conn, student.id)?;
            Some(student.id)
        }
        None => None,
    };
    let after_delete = delete_query.first(conn)?;

    Ok(DemoReport {
        inserted_ids,
        all_students,
        names,
        names_by_name,
        top_grade_limit_1,
        top_grade_first,
        student_count,
        alan_in_grade_11,
        grades_incremented,
        grades_after_update,
        deleted_id,
        after_delete,
    })
}

fn print_report(target: &StoreTarget, report: &DemoReport) {
    println!("Store: {}", target);
    println!("Inserted students: {:?}", report.inserted_ids);

    println!("\nAll students:");
    for student in &report.all_students {
        println!("  {}", student);
    }

    println!("\nNames: {:?}", name_list(&report.names));
    println!("Names by name: {:?}", name_list(&report.names_by_name));

    println!("\nHighest grade (limit 1):");
    for (name, birthday) in &report.top_grade_limit_1 {
        println!("  {} (born {})", OrNone(name), OrNone(&birthday.map(|b| b.date())));
    }
    match &report.top_grade_first {
        Some((name, birthday)) => println!(
            "Highest grade (first): {} (born {})",
            OrNone(name),
            OrNone(&birthday.map(|b| b.date()))
        ),
        None => println!("Highest grade (first): None"),
    }

    println!("\nStudent count: {}", report.student_count);

    println!("\nName contains 'Alan' and grade 11:");
    for student in &report.alan_in_grade_11 {
        println!("  {}", student);
    }

    println!("\nIncremented grade of {} students:", report.grades_incremented);
    for (name, grade) in &report.grades_after_update {
        println!("  {}: {}", OrNone(name), OrNone(grade));
    }

    println!();
    if let Some(id) = report.deleted_id {
        println!("Deleted student {} ({})", id, DELETED_NAME);
    }
    match &report.after_delete {
        Some(student) => println!("{}", student),
        None => println!("None"),
    }
}

fn name_list(names: &[Option<String>]) -> Vec<String> {
    names.iter().map(|n| OrNone(n).to_string()).collect()
}
