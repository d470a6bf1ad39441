//! Toggle overlay: one button (plus Space) flipping the global tree state.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use bevy_tree_morph::TreeState;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_overlay)
            .add_systems(Update, toggle_on_space);
    }
}

/// Draw the control overlay along the bottom of the window.
fn draw_overlay(mut contexts: EguiContexts, mut state: ResMut<TreeState>) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::bottom("overlay")
        .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(0, 24)))
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    egui::RichText::new("GRAND LUXURY")
                        .color(egui::Color32::from_rgb(0xbf, 0x95, 0x3f))
                        .size(28.0),
                );

                let action = match *state {
                    TreeState::Chaos => "ASSEMBLE",
                    TreeState::Formed => "SCATTER",
                };
                if ui
                    .button(egui::RichText::new(action).size(20.0).strong())
                    .clicked()
                {
                    state.toggle();
                }

                let status = match *state {
                    TreeState::Chaos => "Awaiting Order",
                    TreeState::Formed => "Magnificence Achieved",
                };
                ui.label(
                    egui::RichText::new(status)
                        .color(egui::Color32::from_rgb(0x55, 0x6b, 0x5c))
                        .italics(),
                );
            });
        });

    Ok(())
}

/// Keyboard shortcut mirroring the button.
fn toggle_on_space(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<TreeState>) {
    if keys.just_pressed(KeyCode::Space) {
        state.toggle();
    }
}
