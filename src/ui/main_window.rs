use adw::prelude::*;
use adw::Application;

pub fn show_main_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Storynest")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    use std::rc::Rc;
    let history = Rc::new(crate::ui::history::History::new());
    split.set_flap(Some(&history.widget()));

    // Contact page: introduction, the form, footer
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    content.set_margin_top(20);
    content.set_margin_bottom(20);
    content.set_margin_start(20);
    content.set_margin_end(20);

    let heading = gtk4::Label::new(Some("Contact Storynest"));
    heading.add_css_class("title-1");
    heading.set_halign(gtk4::Align::Start);
    content.append(&heading);

    let blurb = gtk4::Label::new(Some(
        "We are dedicated to bringing your ideas to life. Whether you're looking for \
         expert web solutions, custom designs, or seamless functionality, we're here \
         to help. Drop us a message and let's collaborate to build something extraordinary!",
    ));
    blurb.set_wrap(true);
    blurb.set_halign(gtk4::Align::Start);
    blurb.set_xalign(0.0);
    content.append(&blurb);

    let phone = gtk4::Label::new(Some("Have a question? Call us at +234 8142 995114"));
    phone.set_halign(gtk4::Align::Start);
    content.append(&phone);

    let mail = gtk4::Label::new(Some("Prefer email? Reach out at storynest@gmail.com"));
    mail.set_halign(gtk4::Align::Start);
    content.append(&mail);

    let form = crate::ui::contact_form::build(&window, history.clone());
    content.append(&form);

    let footer = gtk4::Label::new(Some("© 2025 WebWiz Creation. Designed and developed for excellence."));
    footer.add_css_class("dim-label");
    content.append(&footer);

    let scroller = gtk4::ScrolledWindow::builder().vexpand(true).hexpand(true).build();
    scroller.set_child(Some(&content));
    split.set_content(Some(&scroller));

    overlay.set_child(Some(&split));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Storynest"));
    header.set_title_widget(Some(&title));

    let settings_btn = gtk4::Button::with_label("Settings");
    header.pack_end(&settings_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    history.reload();

    {
        let app = app.clone();
        let window = window.clone();
        settings_btn.connect_clicked(move |_| {
            crate::ui::setup::show_setup_window(&app);
            window.close();
        });
    }
}
