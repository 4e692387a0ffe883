pub mod convert;
pub mod render;
pub mod run;
pub mod show;
pub mod summary;
pub mod util;

pub use convert::*;
pub use render::*;
pub use run::*;
pub use show::*;
pub use summary::*;
pub use util::*;
