use egui::{Color32, Context, Rounding, Stroke, Visuals};

/// Theme configuration
pub struct Theme {
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Apply the demo theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    if !theme.dark_mode {
        ctx.set_visuals(Visuals::light());
        return;
    }

    let mut visuals = Visuals::dark();

    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let accent_color = Color32::from_rgb(100, 150, 250);

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = Color32::from_rgb(23, 23, 23);

    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 50, 50);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 60, 60);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = accent_color;

    ctx.set_visuals(visuals);
}
