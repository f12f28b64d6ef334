pub mod schema;
pub mod validate;

pub use schema::{
    CrackFillingDetails, CrackSeverity, LineStripingDetails, Location, ParseKindError, PatchType,
    PatchingDetails, ProjectDetails, ProjectType, SealcoatingDetails, SurfaceCondition, Timeline,
};
pub use validate::validate_project;
