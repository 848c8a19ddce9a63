//! egui control surface
//!
//! Velocity controls, the particle quick-reference presets, the gallery and
//! physics-explanation windows, and the zoom overlay. Follows the snapshot +
//! action-flags pattern: the closure mutates simple values and records
//! heavier requests in [`UiActions`] for the app to apply afterwards.

use crate::gallery::Artwork;
use crate::physics::{self, KinematicFactors};
use crate::store::RelativityStore;

/// A named reference speed for the quick-reference panel.
pub struct ParticleReference {
    pub name: &'static str,
    pub velocity: f32,
    pub description: &'static str,
}

pub const PARTICLE_REFERENCES: [ParticleReference; 5] = [
    ParticleReference {
        name: "Commercial Jet",
        velocity: 0.000_000_9,
        description: "Commercial aircraft cruising speed",
    },
    ParticleReference {
        name: "Space Shuttle",
        velocity: 0.000_03,
        description: "Space Shuttle orbital velocity",
    },
    ParticleReference {
        name: "Electron in TV",
        velocity: 0.3,
        description: "Electrons in a cathode ray tube",
    },
    ParticleReference {
        name: "Muon",
        velocity: 0.9994,
        description: "Cosmic ray muons",
    },
    ParticleReference {
        name: "LHC Proton",
        velocity: 0.999_999_99,
        description: "Protons in the Large Hadron Collider",
    },
];

/// The reference particle whose speed is closest to `speed`.
pub fn closest_particle(speed: f32) -> &'static ParticleReference {
    let mut closest = &PARTICLE_REFERENCES[0];
    for particle in &PARTICLE_REFERENCES {
        if (speed - particle.velocity).abs() < (speed - closest.velocity).abs() {
            closest = particle;
        }
    }
    closest
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    fn index(self) -> usize {
        match self {
            Language::English => 0,
            Language::Spanish => 1,
        }
    }
}

/// One explained effect, with text in English and Spanish.
pub struct PhysicsTopic {
    pub title: [&'static str; 2],
    pub description: [&'static str; 2],
    pub formula: &'static str,
    pub explanation: [&'static str; 2],
}

pub const PHYSICS_TOPICS: [PhysicsTopic; 3] = [
    PhysicsTopic {
        title: ["Length Contraction", "Contracción de Longitud"],
        description: [
            "Objects appear shorter in the direction of motion",
            "Los objetos parecen más cortos en la dirección del movimiento",
        ],
        formula: "L = L₀√(1 - v²/c²)",
        explanation: [
            "When an object moves at high speed it appears shorter along its \
             direction of motion, because space itself contracts that way. The \
             faster the object moves, the stronger the contraction; it only \
             becomes noticeable near the speed of light. In the visualization, \
             the image compresses along the motion direction as you raise the \
             velocity.",
            "Cuando un objeto se mueve a alta velocidad parece más corto en la \
             dirección del movimiento, porque el espacio mismo se contrae en \
             esa dirección. Cuanto más rápido se mueve, mayor es la \
             contracción; solo se nota cerca de la velocidad de la luz. En la \
             visualización, la imagen se comprime en la dirección del \
             movimiento al aumentar la velocidad.",
        ],
    },
    PhysicsTopic {
        title: ["Relativistic Doppler Effect", "Efecto Doppler Relativista"],
        description: [
            "Colors shift and brightness changes due to relative motion",
            "Los colores cambian y el brillo se modifica debido al movimiento relativo",
        ],
        formula: "f = f₀√((1 + v/c)/(1 - v/c))",
        explanation: [
            "Light changes colour and intensity when its source moves relative \
             to the observer: approaching light looks bluer and brighter, \
             receding light redder and dimmer. In the visualization the hues \
             rotate and the brightness rises with speed, like a siren changing \
             pitch as it passes, but with light instead of sound.",
            "La luz cambia de color e intensidad cuando la fuente se mueve \
             respecto al observador: la luz que se acerca se ve más azul y \
             brillante, la que se aleja más roja y tenue. En la visualización \
             los colores rotan y el brillo aumenta con la velocidad, como una \
             sirena que cambia de tono al pasar, pero con luz en lugar de \
             sonido.",
        ],
    },
    PhysicsTopic {
        title: ["Time Dilation", "Dilatación del Tiempo"],
        description: [
            "Time appears to slow down for moving objects",
            "El tiempo parece ralentizarse para los objetos en movimiento",
        ],
        formula: "t = t₀/√(1 - v²/c²)",
        explanation: [
            "Time passes more slowly for objects moving at high speed; this is \
             why astronauts on the ISS age slightly slower than people on \
             Earth. The faster the image moves, the more pronounced the \
             relativistic changes become.",
            "El tiempo pasa más lentamente para los objetos que se mueven a \
             alta velocidad; por eso los astronautas de la EEI envejecen un \
             poco más despacio que las personas en la Tierra. Cuanto más \
             rápido se mueve la imagen, más pronunciados son los cambios \
             relativistas.",
        ],
    },
];

/// UI-local state: text buffers, window visibility, the zoom readout.
pub struct UiState {
    velocity_x_input: String,
    velocity_y_input: String,
    selected_particle: Option<usize>,
    gallery_open: bool,
    physics_open: bool,
    language: Language,
    selected_topic: usize,
    zoom_percentage: u32,
    show_zoom_hint: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            velocity_x_input: format_velocity(0.0),
            velocity_y_input: format_velocity(0.0),
            selected_particle: None,
            gallery_open: false,
            physics_open: false,
            language: Language::English,
            selected_topic: 0,
            zoom_percentage: 100,
            show_zoom_hint: true,
        }
    }

    /// Called by the render driver each frame with the derived zoom reading.
    pub fn set_zoom_percentage(&mut self, percentage: u32) {
        self.zoom_percentage = percentage;
    }

    pub fn zoom_percentage(&self) -> u32 {
        self.zoom_percentage
    }

    /// The hint hides while Ctrl is held.
    pub fn set_zoom_hint_visible(&mut self, visible: bool) {
        self.show_zoom_hint = visible;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests recorded by the UI for the app to apply after the frame.
#[derive(Default)]
pub struct UiActions {
    pub selected_artwork: Option<Artwork>,
}

fn format_velocity(v: f32) -> String {
    format!("{v:.4}")
}

/// Parse a velocity text field; out-of-range or non-numeric entries are
/// rejected and the previous value stays in force.
fn parse_velocity(text: &str) -> Option<f32> {
    let v = text.trim().parse::<f32>().ok()?;
    (v.is_finite() && (0.0..=physics::MAX_SPEED).contains(&v)).then_some(v)
}

/// Draw the whole control surface.
pub fn draw(
    ctx: &egui::Context,
    state: &mut UiState,
    store: &mut RelativityStore,
    catalog: &[Artwork],
    fps: f64,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::left("controls")
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Gallery");
                if ui.button("View All").clicked() {
                    state.gallery_open = true;
                }
            });
            if let Some(art) = store.current_art() {
                ui.label(egui::RichText::new(art.display_title()).strong());
                ui.label(format!("by {} ({})", art.artist, art.year));
            }
            ui.separator();

            velocity_controls(ui, state, store);
            ui.separator();

            quick_reference(ui, state, store);
            ui.separator();

            physics_readout(ui, store);
            ui.separator();

            if ui.button("Physics Explained").clicked() {
                state.physics_open = true;
            }
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("FPS: {fps:.1}"))
                    .small()
                    .weak(),
            );
        });

    gallery_window(ctx, state, store, catalog, &mut actions);
    physics_window(ctx, state);
    zoom_overlay(ctx, state);

    actions
}

fn velocity_controls(ui: &mut egui::Ui, state: &mut UiState, store: &mut RelativityStore) {
    ui.label("Horizontal Velocity (c)");
    ui.horizontal(|ui| {
        if ui
            .add(egui::TextEdit::singleline(&mut state.velocity_x_input).desired_width(72.0))
            .changed()
        {
            if let Some(v) = parse_velocity(&state.velocity_x_input) {
                store.set_velocity_x(v);
                state.selected_particle = None;
            }
        }
        ui.label("c");
    });
    let mut vx = store.velocity_x();
    if ui
        .add(egui::Slider::new(&mut vx, 0.0..=physics::MAX_SPEED).step_by(0.0001))
        .changed()
    {
        store.set_velocity_x(vx);
        state.velocity_x_input = format_velocity(store.velocity_x());
        state.selected_particle = None;
    }

    ui.add_space(6.0);
    ui.label("Vertical Velocity (c)");
    ui.horizontal(|ui| {
        if ui
            .add(egui::TextEdit::singleline(&mut state.velocity_y_input).desired_width(72.0))
            .changed()
        {
            if let Some(v) = parse_velocity(&state.velocity_y_input) {
                store.set_velocity_y(v);
                state.selected_particle = None;
            }
        }
        ui.label("c");
    });
    let mut vy = store.velocity_y();
    if ui
        .add(egui::Slider::new(&mut vy, 0.0..=physics::MAX_SPEED).step_by(0.0001))
        .changed()
    {
        store.set_velocity_y(vy);
        state.velocity_y_input = format_velocity(store.velocity_y());
        state.selected_particle = None;
    }
}

fn quick_reference(ui: &mut egui::Ui, state: &mut UiState, store: &mut RelativityStore) {
    ui.label("Quick Reference");
    for (i, particle) in PARTICLE_REFERENCES.iter().enumerate() {
        let selected = state.selected_particle == Some(i);
        let text = format!("{} — {:.4}c", particle.name, particle.velocity);
        let response = ui
            .selectable_label(selected, text)
            .on_hover_text(particle.description);
        if response.clicked() {
            // A preset drives the horizontal axis and resets the vertical one
            store.set_velocity_x(particle.velocity);
            store.set_velocity_y(0.0);
            state.velocity_x_input = format_velocity(store.velocity_x());
            state.velocity_y_input = format_velocity(store.velocity_y());
            state.selected_particle = Some(i);
        }
    }
}

fn physics_readout(ui: &mut egui::Ui, store: &RelativityStore) {
    let speed = store.speed();
    let factors = KinematicFactors::for_speed(speed);
    ui.label(format!("|v| = {speed:.4}c → γ = {:.2}", factors.gamma));
    ui.label(format!(
        "Contraction: {:.4} × original size",
        factors.inv_gamma
    ));
    ui.label(format!("Doppler factor = {:.2}", factors.doppler));

    if speed > physics::DIRECTION_EPSILON {
        let particle = closest_particle(speed);
        let title = store
            .current_art()
            .map(|art| art.display_title())
            .unwrap_or_default();
        ui.add_space(4.0);
        ui.label(format!("You're viewing {} like a {} would", title, particle.name));
        ui.label(egui::RichText::new(particle.description).small().weak());
    }
}

fn gallery_window(
    ctx: &egui::Context,
    state: &mut UiState,
    store: &RelativityStore,
    catalog: &[Artwork],
    actions: &mut UiActions,
) {
    let mut open = state.gallery_open;
    egui::Window::new("Gallery")
        .open(&mut open)
        .resizable(true)
        .show(ctx, |ui| {
            if catalog.is_empty() {
                ui.label("No artworks found");
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for art in catalog {
                    let current = store.current_art().map(|a| &a.id) == Some(&art.id);
                    let text = format!("{} — {} ({})", art.display_title(), art.artist, art.year);
                    if ui.selectable_label(current, text).clicked() {
                        actions.selected_artwork = Some(art.clone());
                    }
                }
            });
        });
    state.gallery_open = open;
}

fn physics_window(ctx: &egui::Context, state: &mut UiState) {
    let mut open = state.physics_open;
    let mut language = state.language;
    let mut selected_topic = state.selected_topic;

    egui::Window::new("Physics Explained")
        .open(&mut open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(language == Language::English, "English")
                    .clicked()
                {
                    language = Language::English;
                }
                if ui
                    .selectable_label(language == Language::Spanish, "Español")
                    .clicked()
                {
                    language = Language::Spanish;
                }
            });
            ui.separator();

            let lang = language.index();
            ui.horizontal(|ui| {
                for (i, topic) in PHYSICS_TOPICS.iter().enumerate() {
                    if ui.selectable_label(selected_topic == i, topic.title[lang]).clicked() {
                        selected_topic = i;
                    }
                }
            });
            ui.separator();

            let topic = &PHYSICS_TOPICS[selected_topic];
            ui.label(egui::RichText::new(topic.title[lang]).heading());
            ui.label(egui::RichText::new(topic.description[lang]).italics());
            ui.add_space(4.0);
            ui.label(egui::RichText::new(topic.formula).monospace());
            ui.add_space(4.0);
            ui.label(topic.explanation[lang]);
        });

    state.physics_open = open;
    state.language = language;
    state.selected_topic = selected_topic;
}

fn zoom_overlay(ctx: &egui::Context, state: &UiState) {
    egui::Area::new(egui::Id::new("zoom_indicator"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(format!("{}% zoom", state.zoom_percentage));
            });
        });

    if state.show_zoom_hint {
        egui::Area::new(egui::Id::new("zoom_hint"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 16.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label("Hold Ctrl to zoom");
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_particle() {
        assert_eq!(closest_particle(0.0).name, "Commercial Jet");
        assert_eq!(closest_particle(0.3).name, "Electron in TV");
        assert_eq!(closest_particle(0.9999).name, "LHC Proton");
    }

    #[test]
    fn test_parse_velocity() {
        assert_eq!(parse_velocity("0.5"), Some(0.5));
        assert_eq!(parse_velocity(" 0.9999 "), Some(0.9999));
        assert_eq!(parse_velocity("1.2"), None);
        assert_eq!(parse_velocity("-0.1"), None);
        assert_eq!(parse_velocity("fast"), None);
        assert_eq!(parse_velocity("NaN"), None);
    }

    #[test]
    fn test_presets_within_cap_after_store_clamp() {
        use crate::store::RelativityStore;
        let mut store = RelativityStore::new();
        for particle in &PARTICLE_REFERENCES {
            store.set_velocity_x(particle.velocity);
            assert!(store.velocity_x() <= physics::MAX_SPEED);
        }
    }
}
