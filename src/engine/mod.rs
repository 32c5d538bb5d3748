pub mod intake;
pub mod queue;
pub mod sqs;
pub mod validator;
