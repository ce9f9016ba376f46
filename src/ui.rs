use three_d::egui::{self, Ui};

use crate::{
	lights::{Attenuation, LightColors, ATTENUATION_PRESETS},
	scene_state::{SceneState, DEFAULT_MODEL_SCALE},
};


pub fn parameter_panel(ctx: &egui::Context, state: &mut SceneState) {
	if state.show_panel {
		egui::Window::new("Parameters")
			.default_width(320.0)
			.show(ctx, |ui| {
				egui::ScrollArea::vertical().show(ui, |ui| panel_contents(ui, state));
			});
	}

	if let Some(path) = state.load_error.clone() {
		egui::Window::new("Error")
			.collapsible(false)
			.resizable(false)
			.show(ctx, |ui| {
				ui.label(format!("Failed to load model: {}", path));
				if ui.button("OK").clicked() {
					state.load_error = None;
				}
			});
	}
}

fn panel_contents(ui: &mut Ui, state: &mut SceneState) {
	ui.horizontal(|ui| {
		ui.label("Clear color");
		ui.color_edit_button_rgba_unmultiplied(&mut state.clear_color);
	});
	ui.checkbox(&mut state.blinn, "Blinn-Phong (B)");

	egui::CollapsingHeader::new("Model").default_open(true).show(ui, |ui| {
		ui.horizontal(|ui| {
			ui.label("Path");
			ui.text_edit_singleline(&mut state.model_path);
		});
		ui.add(egui::Slider::new(&mut state.model_scale, 0.01..=1.0).text("Scale"));
		ui.horizontal(|ui| {
			ui.label("Exact scale");
			ui.add(egui::DragValue::new(&mut state.model_scale).speed(0.001));
			if ui.button("Reset").clicked() {
				state.model_scale = DEFAULT_MODEL_SCALE;
			}
		});
		if ui.button("Load Model").clicked() {
			state.request_reload();
		}
	});

	egui::CollapsingHeader::new("Directional light").show(ui, |ui| {
		vec3_drag(ui, "Direction", &mut state.directional.direction);
		colors(ui, &mut state.directional.colors);
	});

	for (i, light) in state.point_lights.iter_mut().enumerate() {
		egui::CollapsingHeader::new(format!("Point light {}", i)).show(ui, |ui| {
			ui.push_id(i, |ui| {
				vec3_drag(ui, "Position", &mut light.position);
				colors(ui, &mut light.colors);
				distance_preset(ui, &mut light.attenuation);
			});
		});
	}

	egui::CollapsingHeader::new("Spotlight").show(ui, |ui| {
		ui.push_id("spot", |ui| {
			colors(ui, &mut state.spot.colors);
			ui.add(egui::Slider::new(&mut state.spot.cut_off, 0.0..=90.0).text("Cut-off"));
			ui.add(egui::Slider::new(&mut state.spot.outer_cut_off, 0.0..=90.0).text("Outer cut-off"));
			distance_preset(ui, &mut state.spot.attenuation);
		});
	});
}

fn vec3_drag(ui: &mut Ui, label: &str, value: &mut [f32; 3]) {
	ui.horizontal(|ui| {
		ui.label(label);
		for component in value.iter_mut() {
			ui.add(egui::DragValue::new(component).speed(0.05));
		}
	});
}

fn colors(ui: &mut Ui, colors: &mut LightColors) {
	for (label, color) in [
		("Ambient", &mut colors.ambient),
		("Diffuse", &mut colors.diffuse),
		("Specular", &mut colors.specular),
	] {
		ui.horizontal(|ui| {
			ui.label(label);
			ui.color_edit_button_rgb(color);
		});
	}
}

fn distance_preset(ui: &mut Ui, attenuation: &mut Attenuation) {
	let mut selected = attenuation.preset;
	let current = ATTENUATION_PRESETS.get(selected).map_or("custom", |p| p.name);
	egui::ComboBox::from_label("Distance")
		.selected_text(current)
		.show_ui(ui, |ui| {
			for (i, preset) in ATTENUATION_PRESETS.iter().enumerate() {
				ui.selectable_value(&mut selected, i, preset.name);
			}
		});
	if selected != attenuation.preset {
		attenuation.apply_preset(selected);
	}
}
