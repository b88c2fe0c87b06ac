use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use rust_decimal::Decimal;

use super::image::JpegImage;
use super::page::{Font, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, PageWriter};
use crate::core::{Contact, Invoice, InvoiceError, InvoiceSummary, states};

const TITLE: &str = "Tax Invoice/Bill of Supply/Cash Memo";
const SUBTITLE: &str = "Original for Recipient";

const BODY_SIZE: f32 = 11.0;
const LOGO_WIDTH: f32 = 150.0;
const SIGNATURE_WIDTH: f32 = 100.0;
const SIGNATURE_X: f32 = 400.0;

/// Images placed on the invoice. Both must be JPEG.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub logo: Option<Vec<u8>>,
    pub signature: Option<Vec<u8>>,
}

/// Render an invoice and its computed summary into PDF bytes.
pub fn render_invoice(
    invoice: &Invoice,
    summary: &InvoiceSummary,
    options: &RenderOptions,
) -> Result<Vec<u8>, InvoiceError> {
    let logo = options.logo.clone().map(JpegImage::decode).transpose()?;
    let signature = options.signature.clone().map(JpegImage::decode).transpose()?;

    let mut writer = PageWriter::new();

    if let Some(logo) = &logo {
        let height = logo.scaled_height(LOGO_WIDTH);
        writer.image_at("Logo", MARGIN, PAGE_HEIGHT - MARGIN + 5.0, LOGO_WIDTH, height);
    }
    writer.right(TITLE, 20.0, Font::Bold);
    writer.right(SUBTITLE, 12.0, Font::Regular);
    writer.gap(BODY_SIZE);

    // Seller
    let seller = &invoice.seller;
    writer.bold(&format!("Sold By: {}", seller.name), BODY_SIZE);
    writer.text(&seller.address, BODY_SIZE);
    writer.text(&format!("PAN No: {}", or_dash(seller.pan.as_deref())), BODY_SIZE);
    writer.text(
        &format!("GST Registration No: {}", or_dash(seller.gst.as_deref())),
        BODY_SIZE,
    );

    write_contact(&mut writer, "Billing Address:", &invoice.billing);
    write_contact(&mut writer, "Shipping Address:", &invoice.shipping);

    // Order and invoice details
    writer.gap(BODY_SIZE);
    let order = &invoice.order_details;
    let details = &invoice.invoice_details;
    writer.text(&format!("Order No: {}", order.order_no), BODY_SIZE);
    writer.text(&format!("Order Date: {}", order.order_date), BODY_SIZE);
    writer.text(&format!("Invoice No: {}", details.invoice_no), BODY_SIZE);
    writer.text(&format!("Invoice Date: {}", details.invoice_date), BODY_SIZE);
    writer.text(
        &format!("Place of Supply: {}", states::describe(&invoice.place_of_supply)),
        BODY_SIZE,
    );
    writer.text(
        &format!(
            "Place of Delivery: {}",
            states::describe(&invoice.place_of_delivery)
        ),
        BODY_SIZE,
    );
    writer.text(
        &format!(
            "Whether tax is payable under reverse charge: {}",
            if invoice.reverse_charge { "Yes" } else { "No" }
        ),
        BODY_SIZE,
    );

    // Items
    writer.gap(BODY_SIZE);
    writer.heading("Items:", BODY_SIZE);
    for (i, line) in summary.lines.iter().enumerate() {
        writer.text(
            &format!(
                "{}. Item: {}, Unit Price: {}, Qty: {}, Discount: {}, Net: {}",
                i + 1,
                line.description,
                amount(line.unit_price),
                line.quantity,
                amount(line.discount),
                amount(line.net_amount),
            ),
            BODY_SIZE,
        );
        writer.text(
            &format!(
                "    Tax Type: {}, Tax Amount: {}, Total Amount: {}",
                line.tax.tax_type,
                amount(line.tax.tax_amount),
                amount(line.tax.total_amount),
            ),
            BODY_SIZE,
        );
        let components = line
            .tax
            .components()
            .iter()
            .map(|c| format!("{} @ {}%: {}", c.name, amount(c.rate), amount(c.amount)))
            .collect::<Vec<_>>()
            .join(", ");
        writer.text(&format!("    {components}"), BODY_SIZE);
    }

    // Totals
    writer.gap(BODY_SIZE);
    let totals = &summary.totals;
    writer.text(
        &format!("Total Net Amount: {}", amount(totals.total_net_amount)),
        BODY_SIZE,
    );
    writer.text(
        &format!("Total Tax Amount: {}", amount(totals.total_tax_amount)),
        BODY_SIZE,
    );
    writer.bold(
        &format!("Total Amount: {}", amount(totals.total_amount)),
        BODY_SIZE,
    );
    writer.text(
        &format!("Amount in Words: {}", summary.amount_in_words),
        BODY_SIZE,
    );

    // Signature block
    writer.gap(BODY_SIZE);
    writer.bold(&format!("For {}:", seller.name), BODY_SIZE);
    if let Some(signature) = &signature {
        let height = signature.scaled_height(SIGNATURE_WIDTH);
        writer.image("Signature", SIGNATURE_X, SIGNATURE_WIDTH, height);
    }
    writer.text("Authorised Signatory", BODY_SIZE);

    let pages = writer.finish();
    tracing::debug!(
        invoice_no = %details.invoice_no,
        pages = pages.len(),
        "invoice laid out"
    );

    assemble(pages, logo, signature)
}

fn write_contact(writer: &mut PageWriter, heading: &str, contact: &Contact) {
    writer.gap(BODY_SIZE);
    writer.heading(heading, BODY_SIZE);
    writer.text(&contact.name, BODY_SIZE);
    writer.text(&contact.address, BODY_SIZE);
    if let Some(code) = contact.state_code.as_deref().filter(|c| !c.trim().is_empty()) {
        writer.text(&format!("State/UT Code: {}", states::describe(code)), BODY_SIZE);
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

/// Full precision, without trailing zeros.
fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

fn assemble(
    pages: Vec<Vec<lopdf::content::Operation>>,
    logo: Option<JpegImage>,
    signature: Option<JpegImage>,
) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(standard_font("Helvetica"));
    let bold_id = doc.add_object(standard_font("Helvetica-Bold"));

    let mut xobjects = Dictionary::new();
    if let Some(logo) = logo {
        xobjects.set("Logo", doc.add_object(logo.into_stream()));
    }
    if let Some(signature) = signature {
        xobjects.set("Signature", doc.add_object(signature.into_stream()));
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
        "XObject" => xobjects,
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| InvoiceError::Render(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Render(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn standard_font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}
