pub mod assessment;
pub mod enums;
pub mod result;
pub mod symptom;

pub use assessment::*;
pub use enums::*;
pub use result::*;
pub use symptom::*;
