//! Output rendering.
//!
//! The user-facing surface is an external collaborator: the flows only
//! need somewhere to push query results, order listings, and fulfillment
//! receipts. [`RenderTarget`] is that seam; the binary uses
//! [`TextRenderer`], tests use [`BufferRenderer`].

use std::io::Write;

use crate::fulfill::{FulfillmentReport, ShortfallReason};
use crate::models::{Order, Product};

/// Sink for the demo's three output panels.
pub trait RenderTarget {
    /// Query results panel.
    fn results(&mut self, heading: &str, products: &[Product]);
    /// Orders panel.
    fn orders(&mut self, orders: &[Order]);
    /// Fulfillment receipt panel.
    fn receipt(&mut self, report: &FulfillmentReport);
}

fn product_lines(product: &Product) -> String {
    format!(
        "  {} ({})\n    price {} | color {} | material {} | quantity {}\n    {}",
        product.name,
        product.id,
        product.price,
        product.color,
        product.material,
        product.quantity,
        product.description,
    )
}

/// Plain-text renderer over any writer.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderTarget for TextRenderer<W> {
    fn results(&mut self, heading: &str, products: &[Product]) {
        let _ = writeln!(self.out, "== {} ==", heading);
        if products.is_empty() {
            let _ = writeln!(self.out, "  no results");
            return;
        }
        for product in products {
            let _ = writeln!(self.out, "{}", product_lines(product));
        }
    }

    fn orders(&mut self, orders: &[Order]) {
        let _ = writeln!(self.out, "== Orders ==");
        if orders.is_empty() {
            let _ = writeln!(self.out, "  no orders");
            return;
        }
        for order in orders {
            let _ = writeln!(
                self.out,
                "  {} x{} ({})",
                order.name, order.quantity, order.id
            );
        }
    }

    fn receipt(&mut self, report: &FulfillmentReport) {
        let _ = writeln!(self.out, "== Receipt ==");
        for line in &report.fulfilled {
            let _ = writeln!(
                self.out,
                "  {} x{} fulfilled, {} left in stock",
                line.name, line.quantity, line.remaining
            );
        }
        for shortfall in &report.shortfalls {
            match &shortfall.reason {
                ShortfallReason::OutOfStock {
                    available,
                    requested,
                } => {
                    let _ = writeln!(
                        self.out,
                        "  not enough {} left in stock ({} of {} requested)",
                        shortfall.product_id, available, requested
                    );
                }
                ShortfallReason::UnknownProduct => {
                    let _ = writeln!(self.out, "  no such product: {}", shortfall.product_id);
                }
            }
        }
        if report.all_fulfilled() {
            let _ = writeln!(self.out, "  all orders processed");
        }
    }
}

/// In-memory renderer for tests: keeps each panel's last content.
#[derive(Debug, Default)]
pub struct BufferRenderer {
    pub results: Vec<String>,
    pub orders: Vec<String>,
    pub receipt: Vec<String>,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for BufferRenderer {
    fn results(&mut self, heading: &str, products: &[Product]) {
        self.results.clear();
        self.results.push(heading.to_string());
        for product in products {
            self.results.push(product_lines(product));
        }
    }

    fn orders(&mut self, orders: &[Order]) {
        self.orders = orders
            .iter()
            .map(|o| format!("{} x{}", o.name, o.quantity))
            .collect();
    }

    fn receipt(&mut self, report: &FulfillmentReport) {
        self.receipt.clear();
        for line in &report.fulfilled {
            self.receipt
                .push(format!("fulfilled {} x{}", line.name, line.quantity));
        }
        for shortfall in &report.shortfalls {
            self.receipt
                .push(format!("shortfall {}", shortfall.product_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fulfill::{FulfilledLine, Shortfall};

    fn sample_report() -> FulfillmentReport {
        FulfillmentReport {
            fulfilled: vec![FulfilledLine {
                product_id: "cch-blk-ma".to_string(),
                name: "Couch".to_string(),
                quantity: 3,
                remaining: 0,
            }],
            shortfalls: vec![Shortfall {
                product_id: "ch-blu-pin".to_string(),
                name: "Chair".to_string(),
                reason: ShortfallReason::OutOfStock {
                    available: 1,
                    requested: 5,
                },
            }],
        }
    }

    #[test]
    fn test_text_receipt() {
        let mut buf = Vec::new();
        TextRenderer::new(&mut buf).receipt(&sample_report());
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Couch x3 fulfilled"));
        assert!(text.contains("not enough ch-blu-pin left in stock"));
        assert!(!text.contains("all orders processed"));
    }

    #[test]
    fn test_text_empty_results() {
        let mut buf = Vec::new();
        TextRenderer::new(&mut buf).results("By name", &[]);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("no results"));
    }

    #[test]
    fn test_buffer_renderer_captures_panels() {
        let mut target = BufferRenderer::new();
        target.receipt(&sample_report());

        assert_eq!(
            target.receipt,
            vec!["fulfilled Couch x3", "shortfall ch-blu-pin"]
        );
    }
}
