mod calendar_mode;
mod cli_mode;
mod goals_mode;
mod list_mode;

pub use calendar_mode::calendar_mode;
pub use cli_mode::CliModeResult;
pub use goals_mode::goals_mode;
pub use list_mode::list_mode;
