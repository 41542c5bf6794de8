//! Semantic color roles resolved against the active theme.
//!
//! [`resolve`] is a pure two-column lookup. The inactivity alert red and the
//! connected-hour-hand orange are the same on both themes; gauge status
//! colors switch to darker variants on the light theme.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{
    AMBER,
    BLACK,
    DARK_GRAY,
    DARK_GREEN,
    DARK_RED,
    DEEP_BLUE,
    GREEN,
    LIGHT_GRAY,
    MID_GRAY,
    ORANGE,
    RED,
    SKY_BLUE,
    WHITE,
    YELLOW,
};

/// Color scheme selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const COUNT: u8 = 2;

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Dark => 0,
            Self::Light => 1,
        }
    }

    pub const fn from_u8(n: u8) -> Self {
        match n {
            1 => Self::Light,
            _ => Self::Dark,
        }
    }

    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Resolve `role` on this theme.
    #[inline]
    pub const fn color(self, role: ColorRole) -> Rgb565 {
        resolve(role, self)
    }
}

/// What a color is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorRole {
    Background,
    Text,
    MinuteHand,
    HourHandConnected,
    HourHandDisconnected,
    ArborNormal,
    ArborAlert,
    HourHash,
    MinuteHash,
    GaugeLine,
    GaugeGreen,
    GaugeRed,
    GaugeYellow,
    GaugeBlue,
}

impl ColorRole {
    pub const ALL: [Self; 14] = [
        Self::Background,
        Self::Text,
        Self::MinuteHand,
        Self::HourHandConnected,
        Self::HourHandDisconnected,
        Self::ArborNormal,
        Self::ArborAlert,
        Self::HourHash,
        Self::MinuteHash,
        Self::GaugeLine,
        Self::GaugeGreen,
        Self::GaugeRed,
        Self::GaugeYellow,
        Self::GaugeBlue,
    ];
}

/// Concrete color for `role` under `theme`.
pub const fn resolve(role: ColorRole, theme: Theme) -> Rgb565 {
    use ColorRole::*;

    match (role, theme) {
        (Background, Theme::Dark) => BLACK,
        (Background, Theme::Light) => WHITE,
        (Text | MinuteHand | ArborNormal | HourHash, Theme::Dark) => WHITE,
        (Text | MinuteHand | ArborNormal | HourHash, Theme::Light) => BLACK,
        (HourHandConnected, _) => ORANGE,
        (HourHandDisconnected, _) => MID_GRAY,
        (ArborAlert, _) => RED,
        (MinuteHash | GaugeLine, Theme::Dark) => LIGHT_GRAY,
        (MinuteHash | GaugeLine, Theme::Light) => DARK_GRAY,
        (GaugeGreen, Theme::Dark) => GREEN,
        (GaugeGreen, Theme::Light) => DARK_GREEN,
        (GaugeRed, Theme::Dark) => RED,
        (GaugeRed, Theme::Light) => DARK_RED,
        (GaugeYellow, Theme::Dark) => YELLOW,
        (GaugeYellow, Theme::Light) => AMBER,
        (GaugeBlue, Theme::Dark) => SKY_BLUE,
        (GaugeBlue, Theme::Light) => DEEP_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_contrasts_with_ink() {
        for theme in [Theme::Dark, Theme::Light] {
            let bg = resolve(ColorRole::Background, theme);
            for role in [ColorRole::Text, ColorRole::MinuteHand, ColorRole::HourHash] {
                assert_ne!(resolve(role, theme), bg, "{role:?} invisible on {theme:?}");
            }
        }
    }

    #[test]
    fn test_scheme_invariant_roles() {
        for role in [ColorRole::HourHandConnected, ColorRole::ArborAlert] {
            assert_eq!(resolve(role, Theme::Dark), resolve(role, Theme::Light));
        }
    }

    #[test]
    fn test_status_colors_differ_by_theme() {
        for role in [
            ColorRole::GaugeGreen,
            ColorRole::GaugeRed,
            ColorRole::GaugeYellow,
            ColorRole::GaugeBlue,
        ] {
            assert_ne!(resolve(role, Theme::Dark), resolve(role, Theme::Light), "{role:?}");
        }
    }

    #[test]
    fn test_no_role_matches_background() {
        for theme in [Theme::Dark, Theme::Light] {
            let bg = theme.color(ColorRole::Background);
            for role in &ColorRole::ALL[1..] {
                assert_ne!(theme.color(*role), bg, "{role:?} on {theme:?}");
            }
        }
    }

    #[test]
    fn test_theme_codes() {
        assert_eq!(Theme::from_u8(0), Theme::Dark);
        assert_eq!(Theme::from_u8(1), Theme::Light);
        assert_eq!(Theme::from_u8(7), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }
}
