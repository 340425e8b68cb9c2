pub mod app;
pub mod cases;
pub mod config;
pub mod districts;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod population;
pub mod series;
pub mod ui;
pub mod state;
pub mod window;

pub use app::router;
pub use cases::{CaseRow, CaseTable};
pub use config::Config;
pub use districts::District;
pub use errors::DashboardError;
pub use loader::{parse_cases, CaseDataLoader};
pub use population::PopulationTable;
pub use series::{derive, derive_for, DistrictSeries};
pub use state::AppState;
pub use window::last_n;
