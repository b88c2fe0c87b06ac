use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A tax invoice as submitted by the invoice form.
///
/// Field names follow the form payload (camelCase on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Supplier issuing the invoice.
    pub seller: Party,
    /// Billing address block.
    pub billing: Contact,
    /// Shipping address block.
    pub shipping: Contact,
    pub order_details: OrderDetails,
    pub invoice_details: InvoiceDetails,
    /// Invoice lines, in display order.
    pub items: Vec<LineItem>,
    /// Jurisdiction code of the supplier (e.g. "MH").
    pub place_of_supply: String,
    /// Jurisdiction code of the recipient (e.g. "DL").
    pub place_of_delivery: String,
    /// Whether tax is payable on reverse charge basis.
    #[serde(default)]
    pub reverse_charge: bool,
    /// Reference to a previously uploaded signature image.
    #[serde(default)]
    pub signature_image: Option<String>,
}

impl Invoice {
    /// The jurisdiction pair that selects the tax regime for the whole invoice.
    pub fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::new(&self.place_of_supply, &self.place_of_delivery)
    }
}

/// Seller party.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    pub address: String,
    /// Permanent Account Number.
    #[serde(default)]
    pub pan: Option<String>,
    /// GST registration number (GSTIN).
    #[serde(default)]
    pub gst: Option<String>,
}

/// Billing or shipping address block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_no: String,
    pub order_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    pub invoice_no: String,
    pub invoice_date: NaiveDate,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    /// Price per unit, pre-tax.
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Flat discount on the line (not per unit). Absent or `null` is zero.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub discount: Decimal,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

impl LineItem {
    /// `unit_price × quantity − discount`.
    ///
    /// A discount larger than the gross line value yields a negative amount;
    /// it is carried through tax and totals unchanged.
    pub fn net_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity) - self.discount
    }
}

/// Place of supply / place of delivery pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    pub place_of_supply: String,
    pub place_of_delivery: String,
}

impl Jurisdiction {
    pub fn new(place_of_supply: impl Into<String>, place_of_delivery: impl Into<String>) -> Self {
        Self {
            place_of_supply: place_of_supply.into(),
            place_of_delivery: place_of_delivery.into(),
        }
    }

    /// Supply and delivery in the same jurisdiction (exact code match).
    pub fn is_intra_state(&self) -> bool {
        self.place_of_supply == self.place_of_delivery
    }

    /// The regime applied to every line of an invoice with this jurisdiction.
    pub fn tax_type(&self) -> TaxType {
        if self.is_intra_state() {
            TaxType::CgstSgst
        } else {
            TaxType::Igst
        }
    }
}

/// GST regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// Central + State GST, each at half the statutory rate.
    #[serde(rename = "CGST + SGST")]
    CgstSgst,
    /// Integrated GST at the full statutory rate.
    #[serde(rename = "IGST")]
    Igst,
}

impl TaxType {
    /// Label printed on the invoice.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CgstSgst => "CGST + SGST",
            Self::Igst => "IGST",
        }
    }
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tax computed for one net amount. Never stored on the line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub tax_type: TaxType,
    /// For `CgstSgst` this is a single component (CGST or SGST), not their sum.
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    /// Rate of one reported component, in percent.
    pub component_rate: Decimal,
}

/// One named tax component as printed on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxComponent {
    pub name: &'static str,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl TaxResult {
    /// CGST and SGST lines, or a single IGST line.
    pub fn components(&self) -> Vec<TaxComponent> {
        match self.tax_type {
            TaxType::CgstSgst => vec![
                TaxComponent {
                    name: "CGST",
                    rate: self.component_rate,
                    amount: self.tax_amount,
                },
                TaxComponent {
                    name: "SGST",
                    rate: self.component_rate,
                    amount: self.tax_amount,
                },
            ],
            TaxType::Igst => vec![TaxComponent {
                name: "IGST",
                rate: self.component_rate,
                amount: self.tax_amount,
            }],
        }
    }
}

/// Invoice-level sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of line net amounts.
    pub total_net_amount: Decimal,
    /// Sum of per-line `tax_amount` values.
    pub total_tax_amount: Decimal,
    /// `total_net_amount + total_tax_amount`.
    pub total_amount: Decimal,
}
