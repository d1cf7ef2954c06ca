//! Terminal rendering of engine views.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use tabcart_core::{NoticeKind, format_amount};
use tabcart_storefront::view::item_count_label;
use tabcart_storefront::{CartPageMode, CartPageView, Notice, Order, ViewState};

/// Header line: who is signed in and how many items the cart holds.
pub fn header(view: &ViewState) {
    println!("{}", header_line(view));
}

fn header_line(view: &ViewState) -> String {
    let who = view.avatar.as_ref().map_or_else(
        || view.label.clone(),
        |avatar| format!("[{}] {}", avatar.initials, avatar.title),
    );
    format!("{who} | cart: {}", view.cart_count)
}

/// Notices go to stderr so command output stays clean for pipes.
pub fn notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => eprintln!("✓ {}", notice.message),
            NoticeKind::Error => eprintln!("✗ {}", notice.message),
        }
    }
}

pub fn cart_page(page: &CartPageView) {
    for line in page_lines(page) {
        println!("{line}");
    }
}

fn page_lines(page: &CartPageView) -> Vec<String> {
    let mut out = Vec::new();
    match page.mode {
        CartPageMode::Empty => {
            out.push("Your cart is empty".to_owned());
            return out;
        }
        CartPageMode::MergePending { guest_count } => {
            out.push(format!(
                "Guest cart ({}) - run `tabcart merge` to move it into your cart",
                item_count_label(guest_count)
            ));
        }
        CartPageMode::Guest | CartPageMode::Account => {}
    }

    for (index, line) in page.lines.iter().enumerate() {
        let position = if page.removable {
            format!("{index:>3}.")
        } else {
            "   -".to_owned()
        };
        out.push(format!("{position} {}  {}  ({})", line.title, line.price, line.id));
    }
    out.push(format!(
        "Total: {}  {}",
        page.total_display, page.item_count_label
    ));
    if !page.checkout_enabled && page.mode == CartPageMode::Guest {
        out.push("Sign in to checkout".to_owned());
    }
    out
}

pub fn orders(orders: &[Order], symbol: &str) {
    if orders.is_empty() {
        println!("No orders yet");
        return;
    }
    for order in orders {
        println!(
            "#{}  {}  {}  {}",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            format_amount(symbol, order.total),
            item_count_label(order.items.len()),
        );
    }
}
