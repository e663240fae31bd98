mod payment;

pub use payment::{PaymentModel, PaymentStatus, ENTITY_LABEL};
