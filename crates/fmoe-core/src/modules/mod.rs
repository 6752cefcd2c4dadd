pub mod autofrag;
pub mod cpf;
pub mod serialization;

mod traits;

pub use traits::SvlEncode;
