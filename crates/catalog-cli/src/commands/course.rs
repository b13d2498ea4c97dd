//! Course commands

use super::{print_json, StoreArgs};
use catalog_core::{CourseCreateData, CourseFilterRequest, PaginationOptions, SortOrder};
use catalog_core_types::RequestContext;
use catalog_engine::{
    delete_from_db, get_all_from_db, get_data_by_id, insert_into_db, require_found,
    update_one_in_db,
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    pub command: CourseCommand,
}

#[derive(Debug, Subcommand)]
pub enum CourseCommand {
    /// Create a course
    Create(CourseFields),
    /// Overwrite a course and replace its prerequisites
    Update(UpdateArgs),
    /// Show one course with its prerequisites and dependents
    Get { id: String },
    /// List courses
    List(ListArgs),
    /// Delete a course and every edge that references it
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct CourseFields {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub code: String,

    #[arg(long)]
    pub credits: u32,

    /// Prerequisite course id (repeatable, order is kept)
    #[arg(long = "prereq")]
    pub prereqs: Vec<String>,
}

impl CourseFields {
    fn into_payload(self) -> CourseCreateData {
        self.prereqs.into_iter().fold(
            CourseCreateData::new(self.title, self.code, self.credits),
            CourseCreateData::with_prerequisite,
        )
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,

    #[command(flatten)]
    pub fields: CourseFields,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring over title and code
    #[arg(long)]
    pub search: Option<String>,

    /// Exact-match filter, e.g. `--filter credits=3` (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub sort_order: Option<SortOrder>,
}

impl ListArgs {
    fn into_request(self) -> (CourseFilterRequest, PaginationOptions) {
        let filters = CourseFilterRequest {
            search_term: self.search,
            fields: self.filters.into_iter().collect(),
        };
        let options = PaginationOptions {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        };
        (filters, options)
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected field=value, got '{}'", raw)),
    }
}

pub fn execute(store: &StoreArgs, args: CourseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = store.open()?;
    let ctx = RequestContext::new().with_actor("cli");

    match args.command {
        CourseCommand::Create(fields) => {
            let detail = insert_into_db(&ctx, &mut conn, &fields.into_payload())?;
            print_json(&detail)
        }
        CourseCommand::Update(update) => {
            let detail =
                update_one_in_db(&ctx, &mut conn, &update.id, &update.fields.into_payload())?;
            print_json(&detail)
        }
        CourseCommand::Get { id } => {
            let detail = require_found(get_data_by_id(&ctx, &conn, &id)?, &id)?;
            print_json(&detail)
        }
        CourseCommand::List(list) => {
            let (filters, options) = list.into_request();
            print_json(&get_all_from_db(&ctx, &conn, &filters, &options)?)
        }
        CourseCommand::Delete { id } => print_json(&delete_from_db(&ctx, &mut conn, &id)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("credits=3").unwrap(),
            ("credits".to_string(), "3".to_string())
        );
        assert_eq!(
            parse_filter("title=a=b").unwrap(),
            ("title".to_string(), "a=b".to_string())
        );
        assert!(parse_filter("credits").is_err());
        assert!(parse_filter("=3").is_err());
    }

    #[test]
    fn test_prereqs_keep_order() {
        let fields = CourseFields {
            title: "Compilers".to_string(),
            code: "CSE-420".to_string(),
            credits: 3,
            prereqs: vec!["b".to_string(), "a".to_string()],
        };
        let payload = fields.into_payload();
        assert_eq!(payload.prerequisite_ids().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
