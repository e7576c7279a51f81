//! Page layout: sidebar, chat dock, footer and the scrolling main column.

use crate::config;
use crate::state::{AppState, Section};
use chrono::Datelike;
use eframe::egui::{self, Align, Color32, RichText};
use services::ProjectStore;
use shared::chat::{Message, Origin};
use shared::profile::Profile;
use shared::project::{Project, ProjectPatch, ProjectStatus};

const ACCENT: Color32 = Color32::from_rgb(74, 158, 255);
const SUCCESS: Color32 = Color32::from_rgb(76, 175, 80);
const ERROR: Color32 = Color32::from_rgb(229, 83, 83);

const QUICK_PROMPTS: &[(&str, &str)] = &[
    ("Deepfake app", "Tell me about the Deepfake Detection project"),
    ("Technologies", "What technologies does Kaustav use?"),
    ("TrackBot", "How does TrackBot work?"),
    ("Contact", "How can I contact Kaustav?"),
];

pub fn show(state: &mut AppState, ctx: &egui::Context) {
    footer(state, ctx);
    sidebar(state, ctx);
    chat_dock(state, ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let target = state.scroll_to_section.take();

                let hero_response = hero(ui, state);
                if target == Some(Section::Hero) {
                    hero_response.scroll_to_me(Some(Align::TOP));
                }

                ui.add_space(24.0);
                section_heading(ui, Section::Projects, target);
                project_lab(ui, state);

                ui.add_space(24.0);
                section_heading(ui, Section::Journey, target);
                journey(ui, &state.profile);

                ui.add_space(24.0);
                section_heading(ui, Section::Contact, target);
                contact(ui, state);
                ui.add_space(24.0);
            });
    });
}

fn section_heading(ui: &mut egui::Ui, section: Section, target: Option<Section>) {
    let response = ui.heading(RichText::new(section.label()).strong());
    if target == Some(section) {
        response.scroll_to_me(Some(Align::TOP));
    }
    ui.separator();
}

// -- sidebar ----------------------------------------------------------------

fn sidebar(state: &mut AppState, ctx: &egui::Context) {
    egui::SidePanel::left("sidebar")
        .resizable(false)
        .exact_width(250.0)
        .show(ctx, |ui| {
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(72.0, 72.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 36.0, ACCENT);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    state.profile.initials(),
                    egui::FontId::proportional(26.0),
                    Color32::WHITE,
                );
                ui.add_space(8.0);
                ui.label(RichText::new(&state.profile.name).size(18.0).strong());
                ui.label(RichText::new(&state.profile.title).color(ACCENT));
            });

            ui.add_space(8.0);
            ui.label(RichText::new(&state.profile.headline).weak());
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.hyperlink_to("GitHub", &state.profile.socials.github);
                ui.hyperlink_to("LinkedIn", &state.profile.socials.linkedin);
                if let Some(twitter) = &state.profile.socials.twitter {
                    ui.hyperlink_to("Twitter", twitter);
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                counter(ui, state.store.len(), "projects");
                counter(ui, state.profile.skills.len(), "skills");
                counter(ui, state.profile.timeline.len(), "milestones");
            });
            ui.separator();

            for section in Section::all() {
                if ui
                    .add_sized([ui.available_width(), 28.0], egui::Button::new(section.label()))
                    .clicked()
                {
                    state.scroll_to_section = Some(*section);
                }
            }

            ui.separator();
            let mut dark = state.settings.dark_mode;
            if ui.checkbox(&mut dark, "Dark mode").changed() {
                state.settings.dark_mode = dark;
                config::save_settings(&state.settings);
            }
            let mut animate = state.settings.animations_enabled;
            if ui.checkbox(&mut animate, "Animations").changed() {
                state.set_animations_enabled(animate);
                config::save_settings(&state.settings);
            }

            ui.add_space(8.0);
            let assistant = if state.has_remote_assistant() {
                "Assistant: online model"
            } else {
                "Assistant: local answers"
            };
            ui.label(RichText::new(assistant).small().weak());
        });
}

fn counter(ui: &mut egui::Ui, value: usize, label: &str) {
    ui.vertical(|ui| {
        ui.label(RichText::new(value.to_string()).size(20.0).strong().color(ACCENT));
        ui.label(RichText::new(label).small().weak());
    });
}

// -- chat dock --------------------------------------------------------------

fn chat_dock(state: &mut AppState, ctx: &egui::Context) {
    let dark = state.settings.dark_mode;
    egui::SidePanel::right("chat_dock")
        .resizable(true)
        .default_width(340.0)
        .min_width(280.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Ask the assistant");
            ui.separator();

            egui::TopBottomPanel::bottom("chat_input")
                .show_separator_line(true)
                .show_inside(ui, |ui| {
                    chat_input(ui, state);
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        let target = state.scroll_to_message.take();
                        for msg in state.session.transcript() {
                            let response = message_bubble(ui, msg, dark);
                            if target == Some(msg.id()) {
                                response.scroll_to_me(Some(Align::BOTTOM));
                            }
                        }
                        if state.session.is_pending() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("typing…").italics().weak());
                            });
                        }
                    });
            });
        });
}

fn message_bubble(ui: &mut egui::Ui, msg: &Message, dark: bool) -> egui::Response {
    let (fill, text_color, align) = match msg.origin() {
        Origin::User => (ACCENT, Color32::WHITE, Align::Max),
        Origin::Assistant if dark => (Color32::from_gray(45), Color32::from_gray(230), Align::Min),
        Origin::Assistant => (Color32::from_gray(232), Color32::from_gray(30), Align::Min),
    };
    let max_width = ui.available_width() * 0.85;

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(10.0)
            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(RichText::new(msg.text()).color(text_color));
                ui.label(
                    RichText::new(msg.formatted_time())
                        .small()
                        .color(text_color.gamma_multiply(0.7)),
                );
            })
            .response
    })
    .inner
}

fn chat_input(ui: &mut egui::Ui, state: &mut AppState) {
    let pending = state.session.is_pending();
    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui| {
        for (label, prompt) in QUICK_PROMPTS {
            if ui
                .add_enabled(!pending, egui::Button::new(*label).small())
                .clicked()
            {
                state.submit_prompt(prompt);
            }
        }
    });
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let width = ui.available_width() - 64.0;
        let edit = ui.add_enabled(
            !pending,
            egui::TextEdit::singleline(&mut state.chat_input)
                .hint_text("Ask about projects or skills…")
                .desired_width(width),
        );
        let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui.add_enabled(!pending, egui::Button::new("Send")).clicked();
        if (entered || clicked) && state.submit_chat() {
            edit.request_focus();
        }
    });
    ui.add_space(6.0);
}

// -- hero -------------------------------------------------------------------

fn hero(ui: &mut egui::Ui, state: &mut AppState) -> egui::Response {
    let t = state.animation_time();
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, 340.0), egui::Sense::hover());

    let painter = ui.painter_at(rect);
    let backdrop = if state.settings.dark_mode {
        Color32::from_rgb(14, 18, 28)
    } else {
        Color32::from_rgb(228, 236, 248)
    };
    painter.rect_filled(rect, 12.0, backdrop);
    state.particles.paint(&painter, rect, t.as_secs_f64() * 1000.0);

    let side = rect.height().min(rect.width() * 0.4);
    let sphere_rect = egui::Rect::from_center_size(
        egui::pos2(rect.right() - side / 2.0 - 16.0, rect.center().y),
        egui::vec2(side, side),
    );
    state.scene.paint(&painter, sphere_rect, t.as_secs_f32());

    let text_rect = egui::Rect::from_min_max(
        rect.min + egui::vec2(28.0, 28.0),
        egui::pos2(sphere_rect.left() - 16.0, rect.bottom() - 24.0),
    );
    ui.allocate_ui_at_rect(text_rect, |ui| {
        ui.label(RichText::new(&state.profile.name).size(34.0).strong());
        ui.label(RichText::new(&state.profile.title).size(18.0).color(ACCENT));
        ui.add_space(8.0);
        ui.label(RichText::new(&state.profile.headline).size(15.0));
        ui.add_space(4.0);
        ui.label(RichText::new(&state.profile.bio).weak());
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("View Code").clicked() {
                ui.ctx()
                    .open_url(egui::OpenUrl::new_tab(&state.profile.socials.github));
            }
            if ui.button("Explore Projects").clicked() {
                state.scroll_to_section = Some(Section::Projects);
            }
        });
    });

    response
}

// -- project lab ------------------------------------------------------------

enum CardAction {
    Edit(u32, ProjectPatch),
    AttachDemo(u32),
    Focus(u32),
}

fn project_lab(ui: &mut egui::Ui, state: &mut AppState) {
    let target = state.scroll_to_project.take();
    let mut actions = Vec::new();

    for project in state.store.list_all() {
        let response = project_card(ui, project, &mut actions);
        if target == Some(project.id) {
            response.scroll_to_me(Some(Align::Center));
        }
        ui.add_space(10.0);
    }

    // Applied after the loop; the store is borrowed while cards render.
    for action in actions {
        match action {
            CardAction::Edit(id, patch) => state.store.update(id, patch),
            CardAction::AttachDemo(id) => state.attach_demo_from_picker(id),
            CardAction::Focus(id) => state.focus_project(id),
        }
    }
}

fn project_card(
    ui: &mut egui::Ui,
    project: &Project,
    actions: &mut Vec<CardAction>,
) -> egui::Response {
    egui::Frame::group(ui.style())
        .rounding(10.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let mut title = project.title.clone();
            let edited = ui.add(
                egui::TextEdit::singleline(&mut title)
                    .font(egui::TextStyle::Heading)
                    .desired_width(f32::INFINITY)
                    .frame(false),
            );
            if edited.changed() {
                actions.push(CardAction::Edit(project.id, ProjectPatch::title(title)));
            }

            let mut description = project.short_description.clone();
            let edited = ui.add(
                egui::TextEdit::multiline(&mut description)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
            if edited.changed() {
                actions.push(CardAction::Edit(
                    project.id,
                    ProjectPatch::short_description(description),
                ));
            }

            ui.horizontal_wrapped(|ui| {
                for tag in &project.tags {
                    ui.label(
                        RichText::new(format!(" {tag} "))
                            .small()
                            .background_color(ACCENT.gamma_multiply(0.25)),
                    );
                }
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new(project.status.label()).color(status_color(project.status)));
                if project.deployed {
                    ui.label(RichText::new("Deployed").color(SUCCESS));
                }
                ui.label(RichText::new(&project.completion_date).weak());
            });

            ui.horizontal(|ui| {
                if let Some(link) = &project.source_link {
                    ui.hyperlink_to("View code", link);
                }
                match &project.demo_file_name {
                    Some(name) => ui.label(format!("Demo: {name}")),
                    None => ui.label(RichText::new("No demo attached").weak()),
                };
                if ui.small_button("Attach demo…").clicked() {
                    actions.push(CardAction::AttachDemo(project.id));
                }
                if ui.small_button("Focus").clicked() {
                    actions.push(CardAction::Focus(project.id));
                }
            });
        })
        .response
}

fn status_color(status: ProjectStatus) -> Color32 {
    match status {
        ProjectStatus::Active => ACCENT,
        ProjectStatus::Completed => SUCCESS,
        ProjectStatus::Inactive => Color32::GRAY,
    }
}

// -- journey ----------------------------------------------------------------

fn journey(ui: &mut egui::Ui, profile: &Profile) {
    for milestone in &profile.timeline {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&milestone.year).strong().color(ACCENT));
            ui.label(&milestone.event);
        });
    }
    ui.add_space(12.0);
    ui.label(RichText::new("Skills").strong());
    ui.horizontal_wrapped(|ui| {
        for skill in &profile.skills {
            ui.label(RichText::new(format!(" {skill} ")).background_color(ACCENT.gamma_multiply(0.25)));
        }
    });
}

// -- contact ----------------------------------------------------------------

fn contact(ui: &mut egui::Ui, state: &mut AppState) {
    egui::Grid::new("contact_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut state.contact.name);
            ui.end_row();
            ui.label("Email");
            ui.text_edit_singleline(&mut state.contact.email);
            ui.end_row();
        });
    ui.label("Message");
    ui.add(
        egui::TextEdit::multiline(&mut state.contact.message)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
    if ui.button("Send message").clicked() {
        state.submit_contact();
    }
    if let Some(status) = &state.contact_status {
        match status {
            Ok(text) => ui.colored_label(SUCCESS, text),
            Err(text) => ui.colored_label(ERROR, text),
        };
    }
}

// -- footer -----------------------------------------------------------------

fn footer(state: &mut AppState, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let year = chrono::Local::now().year();
            ui.label(RichText::new(footer_credits(&state.profile, &state.store, year)).small().weak());
            ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                if ui.link("Back to top ↑").clicked() {
                    state.scroll_to_section = Some(Section::Hero);
                }
            });
        });
    });
}

pub fn footer_credits(profile: &Profile, store: &ProjectStore, year: i32) -> String {
    format!(
        "© {year} {} · Built with Rust and egui · {} projects · {} skills",
        profile.name,
        store.len(),
        profile.skills.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_counts_store_projects() {
        let profile = Profile::seed();
        let store = ProjectStore::new(profile.projects.clone());
        let credits = footer_credits(&profile, &store, 2025);
        assert!(credits.starts_with("© 2025 Kaustav Chakraborty"));
        assert!(credits.contains("4 projects"));
        assert!(credits.contains("8 skills"));
    }

    #[test]
    fn test_quick_prompts_reach_distinct_topics() {
        let profile = Profile::seed();
        let responder = chat_engine::FallbackResponder::new(profile);
        let topics: Vec<_> = QUICK_PROMPTS
            .iter()
            .map(|(_, prompt)| responder.classify(prompt))
            .collect();
        assert_eq!(
            topics,
            vec![
                chat_engine::Topic::Project(1),
                chat_engine::Topic::Skills,
                chat_engine::Topic::Project(2),
                chat_engine::Topic::Contact,
            ]
        );
    }
}
