//! Visual theming for the topology canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Fill for nodes of a topology built through the forms.
	pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
	/// Fill for nodes of a freshly imported topology.
	pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);

	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS notation: `#rrggbb` when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses `#RRGGBB` or `rgb()`/`rgba()` notation. Anything else is gray.
	pub fn parse(color_str: &str) -> Color {
		let color_str = color_str.trim();
		if color_str.starts_with('#') && color_str.len() == 7 {
			let channel = |range: std::ops::Range<usize>| {
				color_str
					.get(range)
					.and_then(|hex| u8::from_str_radix(hex, 16).ok())
					.unwrap_or(128)
			};
			Color::rgb(channel(1..3), channel(3..5), channel(5..7))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| -> u8 {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line color.
	pub color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width in screen pixels (0 = no border)
	pub border_width: f64,
	/// Outline color.
	pub border_color: Color,
	/// Id label color.
	pub label_color: Color,
	/// Fill for link endpoints that have no node entry.
	pub implicit_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Link lines.
	pub edge: EdgeStyle,
	/// Node circles and labels.
	pub node: NodeStyle,
}

impl Default for Theme {
	/// Light paper background with dark edges and labels.
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(246, 247, 249),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(40, 44, 52, 0.8),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 1.0,
				border_color: Color::rgba(40, 44, 52, 0.35),
				label_color: Color::rgb(20, 22, 26),
				implicit_color: Color::rgb(210, 210, 210),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_css_notations() {
		assert_eq!(Color::parse("#add8e6"), Color::LIGHT_BLUE);
		assert_eq!(
			Color::parse("rgba(1, 2, 3, 0.5)"),
			Color::rgba(1, 2, 3, 0.5)
		);
		assert_eq!(Color::parse("lightblue"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn css_output_drops_opaque_alpha() {
		assert_eq!(Color::LIGHT_GREEN.to_css(), "#90ee90");
		assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
	}
}
