use rand::rngs::OsRng;
use rand::RngCore;

use crate::application::ports::InvoiceNumberSource;
use crate::domain::InvoiceNumber;

/// Draws three bytes from the operating system RNG per invoice number.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomInvoiceNumbers;

impl InvoiceNumberSource for OsRandomInvoiceNumbers {
    fn next_number(&self) -> InvoiceNumber {
        let mut bytes = [0u8; 3];
        OsRng.fill_bytes(&mut bytes);
        InvoiceNumber::from_bytes(bytes)
    }
}
