// Driven port - Random source for invoice numbers (output port)

use crate::domain::InvoiceNumber;

pub trait InvoiceNumberSource: Send + Sync {
    fn next_number(&self) -> InvoiceNumber;
}
