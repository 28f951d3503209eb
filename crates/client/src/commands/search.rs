//! Search command.

use chrono::Local;

use common::AppResult;

use crate::cli::args::SearchArgs;
use crate::search::SearchQuery;

/// Execute the search command
pub async fn execute(args: SearchArgs) -> AppResult<()> {
    let query = SearchQuery {
        location: args.location,
        check_in: args.check_in,
        check_out: args.check_out,
        guests: args.guests,
    };

    let today = Local::now().date_naive();
    query.validate(today).into_result()?;

    println!("{}", query.home_path());
    Ok(())
}
