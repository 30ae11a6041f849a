use super::*;

/// One line of the browse list.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Row {
    Heading(String),
    Note(String),
    Vendor(Vendor),
    Category {
        name: String,
        expanded: bool,
        count: usize,
    },
    Item(CatalogItem),
}

impl Row {
    pub(super) fn selectable(&self) -> bool {
        matches!(self, Row::Vendor(_) | Row::Category { .. } | Row::Item(_))
    }

    pub(super) fn item_id(&self) -> Option<&ItemId> {
        match self {
            Row::Item(item) => Some(&item.id),
            _ => None,
        }
    }

    /// Stable identity used to keep the selection across refreshes.
    pub(super) fn key(&self) -> Option<String> {
        match self {
            Row::Vendor(v) => Some(format!("vendor:{}", v.name)),
            Row::Category { name, .. } => Some(format!("category:{}", name)),
            Row::Item(i) => Some(format!("item:{}", i.id)),
            Row::Heading(_) | Row::Note(_) => None,
        }
    }
}

pub(super) fn build_rows<M: Marketplace>(session: &Session<M>) -> Vec<Row> {
    let mut rows = Vec::new();
    match session.view() {
        None => {}
        Some(CatalogView::Home(home)) => {
            rows.push(Row::Heading("Food courts".to_string()));
            if home.vendors.is_empty() && !session.is_loading() {
                rows.push(Row::Note("No food courts found".to_string()));
            }
            rows.extend(home.vendors.into_iter().map(Row::Vendor));

            let searching = !session.query().is_empty();
            rows.push(Row::Heading(
                if searching { "Search results" } else { "Popular items" }.to_string(),
            ));
            if home.popular.is_empty() && !session.is_loading() {
                rows.push(Row::Note("No items found".to_string()));
            }
            rows.extend(home.popular.into_iter().map(Row::Item));
        }
        Some(CatalogView::Vendor(view)) => {
            if view.is_empty() && !session.is_loading() {
                rows.push(Row::Note("No items match".to_string()));
            }
            for section in view.sections {
                let expanded = session.expansion().is_expanded(&section.category);
                rows.push(Row::Category {
                    name: section.category,
                    expanded,
                    count: section.items.len(),
                });
                if expanded {
                    rows.extend(section.items.into_iter().map(Row::Item));
                }
            }
        }
    }
    rows
}

pub(super) fn first_selectable(rows: &[Row]) -> usize {
    rows.iter().position(Row::selectable).unwrap_or(0)
}

/// Next selectable row in the given direction, or `from` when there is none.
pub(super) fn step(rows: &[Row], from: usize, down: bool) -> usize {
    if down {
        rows.iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, r)| r.selectable())
            .map(|(i, _)| i)
            .unwrap_or(from)
    } else {
        rows[..from.min(rows.len())]
            .iter()
            .rposition(Row::selectable)
            .unwrap_or(from)
    }
}

pub(super) fn position_of_key(rows: &[Row], key: &str) -> Option<usize> {
    rows.iter().position(|r| r.key().as_deref() == Some(key))
}

pub(super) fn position_of_item(rows: &[Row], id: &ItemId) -> Option<usize> {
    rows.iter().position(|r| r.item_id() == Some(id))
}

#[cfg(test)]
#[path = "../tests/tui_shell/rows_tests.rs"]
mod tests;
