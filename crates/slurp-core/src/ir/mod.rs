pub mod arg;
pub mod descriptor;

pub use arg::{Arg, RequestBody};
pub use descriptor::{HttpVerb, OperationDescriptor, Parameter, UNCATEGORIZED, VOID_RESPONSE};
