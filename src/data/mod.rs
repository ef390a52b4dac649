pub mod catalog;
pub mod unit;
pub mod validate;

pub use catalog::{Catalog, CatalogError, UnitSpec, DEFAULT_UNITS_PATH};
pub use unit::{
    Unit, UnitType, ANTI_AIRCRAFT_ARTILLERY, ARTILLERY, BATTLESHIP, CAN_BOMBARD_NAMES, CRUISER,
    DESTROYER, INFANTRY, SUBMARINE,
};
pub use validate::{
    validate_unit_catalog, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
