pub mod context;
pub mod descriptor;
pub mod error;
pub mod function;
pub mod invocation;
pub mod runtime;

pub use context::ServerContext;
pub use descriptor::{DescriptorCommand, FunctionDescriptor};
pub use error::{InitError, InvocationError};
pub use function::FlexFun;
pub use invocation::{Headers, Invocation, Parameters};
pub use runtime::{FunctionRuntime, FunctionStatus};
