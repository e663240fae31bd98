mod manage_payment;

pub use manage_payment::{
    DiscardPaymentUseCase, FetchPaymentUseCase, ListPaymentsUseCase, StorePaymentUseCase,
    UpdatePaymentUseCase,
};
