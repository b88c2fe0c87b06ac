use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::*;
use super::validation;

/// Builder for constructing valid invoices.
///
/// ```
/// use bijak::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let invoice = InvoiceBuilder::new("INV-001", date)
///     .order("ORD-17", date)
///     .seller(PartyBuilder::new("Acme Traders", "12 MG Road, Pune")
///         .pan("AAPFU0939F")
///         .gst("27AAPFU0939F1ZV")
///         .build())
///     .billing(Contact::new("Ravi Kumar", "4 Park Street, Kolkata"))
///     .shipping(Contact::new("Ravi Kumar", "4 Park Street, Kolkata"))
///     .places("MH", "WB")
///     .add_item(LineItemBuilder::new("Steel rods", dec!(500), 2).discount(dec!(100)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.items[0].net_amount(), dec!(900));
/// ```
pub struct InvoiceBuilder {
    invoice_no: String,
    invoice_date: NaiveDate,
    order: Option<OrderDetails>,
    seller: Option<Party>,
    billing: Option<Contact>,
    shipping: Option<Contact>,
    items: Vec<LineItem>,
    place_of_supply: String,
    place_of_delivery: String,
    reverse_charge: bool,
    signature_image: Option<String>,
}

impl InvoiceBuilder {
    pub fn new(invoice_no: impl Into<String>, invoice_date: NaiveDate) -> Self {
        Self {
            invoice_no: invoice_no.into(),
            invoice_date,
            order: None,
            seller: None,
            billing: None,
            shipping: None,
            items: Vec::new(),
            place_of_supply: String::new(),
            place_of_delivery: String::new(),
            reverse_charge: false,
            signature_image: None,
        }
    }

    pub fn order(mut self, order_no: impl Into<String>, order_date: NaiveDate) -> Self {
        self.order = Some(OrderDetails {
            order_no: order_no.into(),
            order_date,
        });
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn billing(mut self, contact: Contact) -> Self {
        self.billing = Some(contact);
        self
    }

    pub fn shipping(mut self, contact: Contact) -> Self {
        self.shipping = Some(contact);
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Place of supply and place of delivery.
    pub fn places(
        mut self,
        place_of_supply: impl Into<String>,
        place_of_delivery: impl Into<String>,
    ) -> Self {
        self.place_of_supply = place_of_supply.into();
        self.place_of_delivery = place_of_delivery.into();
        self
    }

    pub fn reverse_charge(mut self, reverse_charge: bool) -> Self {
        self.reverse_charge = reverse_charge;
        self
    }

    pub fn signature_image(mut self, reference: impl Into<String>) -> Self {
        self.signature_image = Some(reference.into());
        self
    }

    /// Build the invoice and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let invoice = self.build_unchecked()?;

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            return Err(InvoiceError::Validation(errors));
        }

        Ok(invoice)
    }

    /// Build without validation. Still requires seller and billing.
    pub fn build_unchecked(self) -> Result<Invoice, InvoiceError> {
        let seller = self
            .seller
            .ok_or_else(|| InvoiceError::Builder("seller is required".into()))?;
        let billing = self
            .billing
            .ok_or_else(|| InvoiceError::Builder("billing address is required".into()))?;
        let shipping = self.shipping.unwrap_or_else(|| billing.clone());
        let order_details = self.order.unwrap_or_else(|| OrderDetails {
            order_no: self.invoice_no.clone(),
            order_date: self.invoice_date,
        });

        Ok(Invoice {
            seller,
            billing,
            shipping,
            order_details,
            invoice_details: InvoiceDetails {
                invoice_no: self.invoice_no,
                invoice_date: self.invoice_date,
            },
            items: self.items,
            place_of_supply: self.place_of_supply,
            place_of_delivery: self.place_of_delivery,
            reverse_charge: self.reverse_charge,
            signature_image: self.signature_image,
        })
    }
}

/// Builder for the seller party.
pub struct PartyBuilder {
    name: String,
    address: String,
    pan: Option<String>,
    gst: Option<String>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            pan: None,
            gst: None,
        }
    }

    pub fn pan(mut self, pan: impl Into<String>) -> Self {
        self.pan = Some(pan.into());
        self
    }

    pub fn gst(mut self, gstin: impl Into<String>) -> Self {
        self.gst = Some(gstin.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            address: self.address,
            pan: self.pan,
            gst: self.gst,
        }
    }
}

impl Contact {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            state_code: None,
        }
    }

    pub fn with_state_code(mut self, code: impl Into<String>) -> Self {
        self.state_code = Some(code.into());
        self
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: String,
    unit_price: Decimal,
    quantity: u32,
    discount: Decimal,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            description: description.into(),
            unit_price,
            quantity,
            discount: Decimal::ZERO,
        }
    }

    pub fn discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            unit_price: self.unit_price,
            quantity: self.quantity,
            discount: self.discount,
        }
    }
}
