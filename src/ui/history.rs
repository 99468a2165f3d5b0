use gtk4::prelude::*;
use gtk4 as gtk;

use crate::storage::SubmissionSummary;

pub struct History {
    root: gtk::Box,
    list: gtk::ListBox,
}

impl History {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Recent submissions"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        root.append(&list);

        Self { root, list }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn reload(&self) {
        match crate::storage::recent_submissions(Some(200)) {
            Ok(items) => self.set_items(items),
            Err(err) => eprintln!("Failed to load submission journal: {err}"),
        }
    }

    pub fn set_items(&self, items: Vec<SubmissionSummary>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for item in items {
            let row = gtk::ListBoxRow::new();
            let cell = gtk::Box::new(gtk::Orientation::Vertical, 2);
            cell.set_margin_top(8);
            cell.set_margin_bottom(8);
            cell.set_margin_start(8);
            cell.set_margin_end(8);

            let name = gtk::Label::new(Some(&item.name));
            name.set_halign(gtk::Align::Start);
            cell.append(&name);

            let detail = gtk::Label::new(Some(&format!("{} · {}", item.tel, format_ts(item.submitted_at))));
            detail.add_css_class("dim-label");
            detail.add_css_class("caption");
            detail.set_halign(gtk::Align::Start);
            cell.append(&detail);

            row.set_child(Some(&cell));
            self.list.append(&row);
        }
    }
}

fn format_ts(ts: i64) -> String {
    glib::DateTime::from_unix_local(ts)
        .ok()
        .and_then(|dt| dt.format("%Y-%m-%d %H:%M").ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| ts.to_string())
}
