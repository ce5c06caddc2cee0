//! Plain-text invoice rendering.

use tradeloom_buyers::BuyerProfile;
use tradeloom_orders::Order;

const PAGE_WIDTH: usize = 70;
const NAME_COLUMN: usize = 32;

/// Header branding for rendered invoices.
#[derive(Debug, Clone)]
pub struct InvoiceBranding {
    pub name: String,
    pub tagline: String,
}

impl Default for InvoiceBranding {
    fn default() -> Self {
        Self {
            name: "TRADELOOM".to_string(),
            tagline: "Premium Wholesale Fashion".to_string(),
        }
    }
}

/// Render a finalized order as a printable document.
///
/// Everything shown comes from the order snapshot and the buyer profile; no
/// price is resolved or recomputed here.
pub fn render_invoice(order: &Order, buyer: &BuyerProfile, branding: &InvoiceBranding) -> Vec<u8> {
    let mut doc = String::new();

    push_centered(&mut doc, &branding.name);
    push_centered(&mut doc, &branding.tagline);
    doc.push('\n');
    push_centered(&mut doc, "INVOICE");
    doc.push('\n');

    doc.push_str(&format!("Invoice No: {}\n", order.invoice_number()));
    doc.push_str(&format!("Date: {}\n", order.created_at().format("%d %b %Y")));
    doc.push_str(&format!("Status: {}\n", order.status()));
    doc.push('\n');

    doc.push_str("Bill To:\n");
    doc.push_str(&format!("  {}\n", buyer.name));
    if !buyer.company.is_empty() {
        doc.push_str(&format!("  {}\n", buyer.company));
    }
    doc.push_str(&format!("  {}\n", buyer.email));
    if !buyer.phone.is_empty() {
        doc.push_str(&format!("  {}\n", buyer.phone));
    }
    if !buyer.gstin.is_empty() {
        doc.push_str(&format!("  GSTIN: {}\n", buyer.gstin));
    }
    doc.push('\n');

    let addr = order.shipping_address();
    doc.push_str("Ship To:\n");
    doc.push_str(&format!("  {}, {}\n", addr.street, addr.city));
    doc.push_str(&format!("  {} - {}, {}\n", addr.state, addr.pincode, addr.country));
    doc.push('\n');

    doc.push_str(&format!(
        "{:<name$}{:<10}{:>6}{:>10}{:>12}\n",
        "Item",
        "Size",
        "Qty",
        "Price",
        "Total",
        name = NAME_COLUMN
    ));
    push_rule(&mut doc);
    for item in order.items() {
        doc.push_str(&format!(
            "{:<name$}{:<10}{:>6}{:>10}{:>12}\n",
            clip(&item.name, NAME_COLUMN - 2),
            item.size.as_deref().unwrap_or("-"),
            item.quantity,
            format!("₹{}", item.unit_price),
            format!("₹{}", item.line_total()),
            name = NAME_COLUMN
        ));
    }
    push_rule(&mut doc);
    doc.push_str(&format!(
        "{:>width$}\n",
        format!("Total Amount: ₹{}", order.total_amount()),
        width = PAGE_WIDTH
    ));
    doc.push('\n');

    push_centered(
        &mut doc,
        "This is a computer-generated invoice. Thank you for your business!",
    );

    doc.into_bytes()
}

fn push_centered(doc: &mut String, line: &str) {
    let len = line.chars().count();
    let pad = PAGE_WIDTH.saturating_sub(len) / 2;
    doc.push_str(&" ".repeat(pad));
    doc.push_str(line);
    doc.push('\n');
}

fn push_rule(doc: &mut String) {
    doc.push_str(&"-".repeat(PAGE_WIDTH));
    doc.push('\n');
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
