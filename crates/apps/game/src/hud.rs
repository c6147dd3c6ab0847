use glam::Vec3;
use wanderer_character::AnimState;

/// Values shown in the HUD, captured after the frame's update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStats {
    pub fps: f32,
    pub state: AnimState,
    pub frame: usize,
    pub breakdance_timer: f32,
    pub position: Vec3,
    pub destination: Vec3,
}

impl HudStats {
    pub fn lines(&self) -> [String; 4] {
        [
            format!("FPS: {:.0}", self.fps),
            format!("State: {} (frame {})", self.state, self.frame),
            format!("Breakdance: {:.2}s", self.breakdance_timer.max(0.0)),
            format!(
                "Position: ({:.1}, {:.1}, {:.1})  Destination: ({:.1}, {:.1}, {:.1})",
                self.position.x,
                self.position.y,
                self.position.z,
                self.destination.x,
                self.destination.y,
                self.destination.z
            ),
        ]
    }
}

/// Draw the stats overlay in the top-left corner
pub fn render_hud(ctx: &egui::Context, stats: &HudStats) {
    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for line in stats.lines() {
                    ui.label(line);
                }
                ui.separator();
                ui.label("Click: move  Shift: run  Space: breakdance  F10: borderless");
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let stats = HudStats {
            fps: 59.6,
            state: AnimState::Breakdance,
            frame: 12,
            breakdance_timer: -0.01,
            position: Vec3::new(1.0, 0.0, -2.0),
            destination: Vec3::new(5.0, 0.0, 5.0),
        };
        let lines = stats.lines();
        assert_eq!(lines[0], "FPS: 60");
        assert_eq!(lines[1], "State: Breakdance (frame 12)");
        assert_eq!(lines[2], "Breakdance: 0.00s");
        assert!(lines[3].starts_with("Position: (1.0, 0.0, -2.0)"));
    }
}
