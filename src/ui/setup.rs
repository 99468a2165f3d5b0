use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

pub fn show_setup_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Storynest Setup")
        .default_width(420)
        .default_height(260)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    // Root container
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    // Title
    let title = gtk::Label::new(Some("Connect to Storynest"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    // Server URL
    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some("Server URL (e.g. https://storynest.example:1234)"));
    server_entry.set_hexpand(true);

    // API key
    let key_entry = gtk::PasswordEntry::new();
    key_entry.set_placeholder_text(Some("API Key"));
    key_entry.set_hexpand(true);

    // Arrange fields
    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    form.append(&server_entry);
    form.append(&key_entry);
    root.append(&form);

    // Status label (small, muted)
    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    // Connect button
    let connect_btn = gtk::Button::with_label("Connect");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    // Add a header bar inside content to show window decorations
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Storynest"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    // Trigger connect action
    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let server_entry = server_entry.clone();
        let key_entry = key_entry.clone();
        move || {
            let overlay = overlay.clone();
            let raw_url = server_entry.text();
            let api_key = key_entry.text().to_string();
            if raw_url.trim().is_empty() || api_key.is_empty() {
                overlay.add_toast(adw::Toast::new("Please enter server URL and API key."));
                return;
            }
            let url = crate::utils::normalize_url(&raw_url);

            status.set_label("Connecting…");
            status.add_css_class("dim-label");

            // Reachability check; credentials are saved either way
            let key_for_async = api_key.clone();
            let url_for_async = url.clone();
            let rx: glib::Receiver<Result<(String, String), String>> = crate::utils::run_async_to_main(async move {
                let client = crate::api::client::ApiClient {
                    http: reqwest::Client::builder()
                        .timeout(std::time::Duration::from_secs(5))
                        .build()
                        .map_err(|e| e.to_string())?,
                };

                match client.server_info(&url_for_async, None, Some(key_for_async.as_str())).await {
                    Ok(code) if (200..300).contains(&code) => Ok((url_for_async, "Connected".to_string())),
                    Ok(_) => Ok((url_for_async, "Saved (server info unavailable)".to_string())),
                    Err(_) => Ok((url_for_async, "Saved (server unreachable)".to_string())),
                }
            });

            let status_label = status.clone();
            let app2 = app.clone();
            let window2 = window.clone();
            let overlay2 = overlay.clone();
            let key_for_save = api_key.clone();
            rx.attach(None, move |res| {
                match res {
                    Ok((base_url, message)) => {
                        eprintln!("Server check: {base_url} - {message}");
                        status_label.set_label(&message);
                        // Always persist credentials
                        let mut st = crate::app::AppState::load();
                        st.base_url = base_url;
                        st.api_key = key_for_save.clone();
                        st.token = None; // Clear any old token
                        if let Err(e) = st.save() {
                            overlay2.add_toast(adw::Toast::new(&format!("Failed to save settings: {}", e)));
                        }
                        crate::ui::main_window::show_main_window(&app2);
                        window2.close();
                    }
                    Err(err) => {
                        eprintln!("Server check failed: {err}");
                        status_label.set_label("Connection failed");
                        overlay2.add_toast(adw::Toast::new("Could not validate server. Check URL and API key."));
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    };

    use std::rc::Rc;
    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    // Button click
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    // Enter key in either field triggers connect
    {
        let on_connect = on_connect.clone();
        server_entry.connect_activate(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        key_entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}
