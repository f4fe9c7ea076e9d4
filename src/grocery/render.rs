//! Plain-text and HTML shopping lists.
//!
//! Trader Joe's gets a tick-box checklist, other stores a cart-ready bullet
//! list, and unassigned items a generic section. Stores with nothing to buy
//! are left out.

use super::{GroceryList, StoreGroup};
use crate::model::{GroceryLineItem, UNASSIGNED_STORE};
use html_escape::encode_text;

/// Store rendered as a tick-box checklist.
pub const CHECKLIST_STORE: &str = "Trader Joe's";

const UNASSIGNED_HEADING: &str = "Other Items";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupStyle {
    Checklist,
    CartReady,
    Unassigned,
}

fn style_for(store: &str) -> GroupStyle {
    if store == UNASSIGNED_STORE {
        GroupStyle::Unassigned
    } else if store.replace('\u{2019}', "'").eq_ignore_ascii_case(CHECKLIST_STORE) {
        GroupStyle::Checklist
    } else {
        GroupStyle::CartReady
    }
}

fn heading(group: &StoreGroup, style: GroupStyle) -> String {
    match style {
        GroupStyle::Checklist => group.store.clone(),
        GroupStyle::CartReady => format!("{} Cart-Ready List", group.store),
        GroupStyle::Unassigned => UNASSIGNED_HEADING.to_string(),
    }
}

/// Whole numbers print without decimals, the rest with at most two.
pub fn format_quantity(qty: f64) -> String {
    let rounded = qty.round();
    if (qty - rounded).abs() < 1e-9 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{qty:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `<qty> <unit> <Name>`
fn item_label(item: &GroceryLineItem) -> String {
    format!(
        "{} {} {}",
        format_quantity(item.qty),
        item.unit,
        capitalize(&item.name)
    )
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_text(list: &GroceryList) -> String {
    let sections: Vec<String> = list
        .groups()
        .iter()
        .filter(|group| !group.items.is_empty())
        .map(|group| {
            let style = style_for(&group.store);
            let mut section = format!("## {}\n", heading(group, style));
            for item in &group.items {
                let bullet = match style {
                    GroupStyle::Checklist => "- [ ]",
                    GroupStyle::CartReady | GroupStyle::Unassigned => "-",
                };
                section.push_str(&format!("{} {}\n", bullet, item_label(item)));
            }
            section
        })
        .collect();

    sections.join("\n")
}

pub fn render_html(list: &GroceryList) -> String {
    let mut html = String::from("<div class=\"grocery-list\">\n");
    for group in list.groups().iter().filter(|group| !group.items.is_empty()) {
        let style = style_for(&group.store);
        html.push_str("<section>\n");
        html.push_str(&format!("<h2>{}</h2>\n", encode_text(&heading(group, style))));
        html.push_str("<ul>\n");
        for item in &group.items {
            let label = encode_text(&item_label(item)).into_owned();
            match style {
                GroupStyle::Checklist => html.push_str(&format!(
                    "<li><label><input type=\"checkbox\"> {label}</label></li>\n"
                )),
                GroupStyle::CartReady | GroupStyle::Unassigned => {
                    html.push_str(&format!("<li>{label}</li>\n"))
                }
            }
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</div>\n");
    html
}
