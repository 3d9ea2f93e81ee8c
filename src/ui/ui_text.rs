/// Fixed strings shown in the chart window
pub struct UiText {
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub hover_value_prefix: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    plot_x_axis: "Date",
    plot_y_axis: "Cumulative Wealth",
    hover_value_prefix: "$",
};
