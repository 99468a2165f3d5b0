use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::flow::SubmissionFlow;
use crate::form::{FieldErrors, SubmissionInput};
use crate::ui::history::History;

/// Build the contact form card and wire it to a `SubmissionFlow`.
pub fn build(window: &adw::ApplicationWindow, history: Rc<History>) -> gtk::Widget {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 8);
    card.add_css_class("card");
    card.set_margin_top(12);
    card.set_margin_bottom(12);
    card.set_margin_start(12);
    card.set_margin_end(12);

    let inner = gtk::Box::new(gtk::Orientation::Vertical, 8);
    inner.set_margin_top(16);
    inner.set_margin_bottom(16);
    inner.set_margin_start(16);
    inner.set_margin_end(16);
    card.append(&inner);

    let heading = gtk::Label::new(Some("Contact Form"));
    heading.add_css_class("title-2");
    inner.append(&heading);

    let (name_entry, name_error) = field("Name...");
    let (number_entry, number_error) = field("+234...");
    let (email_entry, email_error) = field("Email...");
    let (address_entry, address_error) = field("Address...");
    for (entry, error) in [
        (&name_entry, &name_error),
        (&number_entry, &number_error),
        (&email_entry, &email_error),
        (&address_entry, &address_error),
    ] {
        inner.append(entry);
        inner.append(error);
    }

    // Message is the one multi-line field
    let message_label = gtk::Label::new(Some("Message..."));
    message_label.add_css_class("dim-label");
    message_label.set_halign(gtk::Align::Start);
    inner.append(&message_label);

    let message_view = gtk::TextView::new();
    message_view.set_wrap_mode(gtk::WrapMode::WordChar);
    let message_scroller = gtk::ScrolledWindow::builder()
        .min_content_height(120)
        .hexpand(true)
        .build();
    message_scroller.set_child(Some(&message_view));
    message_scroller.add_css_class("frame");
    inner.append(&message_scroller);

    let message_error = error_label();
    inner.append(&message_error);

    let submit_btn = gtk::Button::with_label("Send Message");
    submit_btn.add_css_class("suggested-action");
    inner.append(&submit_btn);

    let flow = Rc::new(RefCell::new(SubmissionFlow::new()));

    let set_processing: Rc<dyn Fn(bool)> = Rc::new({
        let submit_btn = submit_btn.clone();
        move |on| {
            submit_btn.set_sensitive(!on);
            if on {
                let spinner = gtk::Spinner::new();
                spinner.start();
                submit_btn.set_child(Some(&spinner));
            } else {
                submit_btn.set_label("Send Message");
            }
        }
    });

    let render_errors: Rc<dyn Fn(&FieldErrors)> = Rc::new({
        let name_error = name_error.clone();
        let number_error = number_error.clone();
        let email_error = email_error.clone();
        let address_error = address_error.clone();
        let message_error = message_error.clone();
        move |errors| {
            show_error(&name_error, errors.name);
            show_error(&number_error, errors.number);
            show_error(&email_error, errors.email);
            show_error(&address_error, errors.address);
            show_error(&message_error, errors.message);
        }
    });

    let read_input: Rc<dyn Fn() -> SubmissionInput> = Rc::new({
        let name_entry = name_entry.clone();
        let number_entry = number_entry.clone();
        let email_entry = email_entry.clone();
        let address_entry = address_entry.clone();
        let message_view = message_view.clone();
        move || SubmissionInput {
            name: name_entry.text().to_string(),
            number: number_entry.text().to_string(),
            email: email_entry.text().to_string(),
            address: address_entry.text().to_string(),
            message: {
                let buffer = message_view.buffer();
                buffer
                    .text(&buffer.start_iter(), &buffer.end_iter(), false)
                    .to_string()
            },
        }
    });

    let clear_entries: Rc<dyn Fn()> = Rc::new({
        let name_entry = name_entry.clone();
        let number_entry = number_entry.clone();
        let email_entry = email_entry.clone();
        let address_entry = address_entry.clone();
        let message_view = message_view.clone();
        move || {
            name_entry.set_text("");
            number_entry.set_text("");
            email_entry.set_text("");
            address_entry.set_text("");
            message_view.buffer().set_text("");
        }
    });

    let on_submit: Rc<dyn Fn()> = Rc::new({
        let flow = flow.clone();
        let window = window.clone();
        let history = history.clone();
        let set_processing = set_processing.clone();
        let render_errors = render_errors.clone();
        let read_input = read_input.clone();
        let clear_entries = clear_entries.clone();
        move || {
            let record = {
                let mut flow_ref = flow.borrow_mut();
                flow_ref.set_input(read_input());
                let record = flow_ref.try_begin(crate::utils::now_ts());
                render_errors(flow_ref.errors());
                record
            };
            let Some(record) = record else {
                return;
            };

            set_processing(true);
            let state = crate::app::AppState::load();
            let rx = crate::utils::run_async_to_main(async move {
                let client = crate::api::client::ApiClient::new();
                client
                    .create_story(&state.base_url, &state.api_key, &record)
                    .await
                    .map(|receipt| (receipt, record))
                    .map_err(|e| e.to_string())
            });

            let flow = flow.clone();
            let window = window.clone();
            let history = history.clone();
            let set_processing = set_processing.clone();
            let clear_entries = clear_entries.clone();
            rx.attach(None, move |res| {
                set_processing(false);
                match res {
                    Ok((receipt, record)) => {
                        eprintln!("Story created: {}", receipt.id);
                        if let Err(err) = crate::storage::record_submission(&receipt.id, &record) {
                            eprintln!("Failed to journal submission: {err}");
                        }
                        flow.borrow_mut().complete_success();
                        clear_entries();
                        history.reload();
                        show_success_modal(&window, flow.clone());
                    }
                    Err(err) => {
                        eprintln!("Error sending form: {err}");
                        flow.borrow_mut().complete_failure();
                        show_network_alert(&window);
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    });

    {
        let on_submit = on_submit.clone();
        submit_btn.connect_clicked(move |_| (on_submit)());
    }
    // Enter key in the single-line fields submits
    for entry in [&name_entry, &number_entry, &email_entry, &address_entry] {
        let on_submit = on_submit.clone();
        entry.connect_activate(move |_| (on_submit)());
    }

    card.upcast()
}

fn field(placeholder: &str) -> (gtk::Entry, gtk::Label) {
    let entry = gtk::Entry::new();
    entry.set_placeholder_text(Some(placeholder));
    entry.set_hexpand(true);
    (entry, error_label())
}

fn error_label() -> gtk::Label {
    let label = gtk::Label::new(None);
    label.add_css_class("error");
    label.add_css_class("caption");
    label.set_halign(gtk::Align::Start);
    label.set_visible(false);
    label
}

fn show_error(label: &gtk::Label, message: Option<&'static str>) {
    match message {
        Some(msg) => {
            label.set_label(msg);
            label.set_visible(true);
        }
        None => {
            label.set_label("");
            label.set_visible(false);
        }
    }
}

fn show_success_modal(window: &adw::ApplicationWindow, flow: Rc<RefCell<SubmissionFlow>>) {
    let dialog = gtk::Dialog::builder()
        .title("Submission Successful")
        .transient_for(window)
        .modal(true)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(24);
    content.set_margin_bottom(24);
    content.set_margin_start(24);
    content.set_margin_end(24);

    let title = gtk::Label::new(Some("Submission Successful"));
    title.add_css_class("title-2");
    content.append(&title);

    let check = gtk::Image::from_icon_name("emblem-ok-symbolic");
    check.set_pixel_size(48);
    check.add_css_class("success");
    content.append(&check);

    dialog.content_area().append(&content);
    let close_btn = dialog.add_button("Close", gtk::ResponseType::Close);
    close_btn.add_css_class("suggested-action");

    dialog.connect_response(move |dlg, _| {
        flow.borrow_mut().dismiss_success();
        dlg.close();
    });
    dialog.present();
}

fn show_network_alert(window: &adw::ApplicationWindow) {
    let dialog = gtk::Dialog::builder()
        .title("Submission failed")
        .transient_for(window)
        .modal(true)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(24);
    content.set_margin_bottom(24);
    content.set_margin_start(24);
    content.set_margin_end(24);

    let message = gtk::Label::new(Some("Please check your network. Try again!"));
    content.append(&message);

    dialog.content_area().append(&content);
    let _ = dialog.add_button("Close", gtk::ResponseType::Close);

    dialog.connect_response(move |dlg, _| dlg.close());
    dialog.present();
}
