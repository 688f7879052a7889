//! Builtin preset families.
//!
//! Every family covers the same key set: heading/body typography, the core
//! color palette, table-of-contents, breadcrumb, pagination, menu/footer
//! colors and header/logo sizing tokens.

use super::Preset;

/// Clean sans-serif look with a blue accent.
pub fn modern() -> Preset {
    Preset::from_pairs(
        "modern",
        &[
            ("heading_font_family", "Inter, sans-serif"),
            ("body_font_family", "Inter, sans-serif"),
            ("h1_font_size", "2.25rem"),
            ("h1_font_color", "#111827"),
            ("h2_font_size", "1.75rem"),
            ("h2_font_color", "#111827"),
            ("h3_font_size", "1.375rem"),
            ("h3_font_color", "#1F2937"),
            ("h4_font_size", "1.125rem"),
            ("h4_font_color", "#1F2937"),
            ("heading_transform", "none"),
            ("body_font_size", "1rem"),
            ("body_font_color", "#374151"),
            ("body_background_color", "#FFFFFF"),
            ("caption_font_size", "0.875rem"),
            ("caption_font_color", "#6B7280"),
            ("link_color", "#2563EB"),
            ("link_hover_color", "#1D4ED8"),
            ("link_underline", "hover"),
            ("primary_color", "#2563EB"),
            ("secondary_color", "#0EA5E9"),
            ("accent_color", "#F59E0B"),
            ("muted_color", "#9CA3AF"),
            ("border_color", "#E5E7EB"),
            ("blockquote_border_color", "#2563EB"),
            ("blockquote_font_color", "#4B5563"),
            ("toc_font_size", "0.9375rem"),
            ("toc_font_color", "#374151"),
            ("toc_background_color", "#F9FAFB"),
            ("toc_border_color", "#E5E7EB"),
            ("toc_indent_size", "1.25rem"),
            ("toc_heading_transform", "uppercase"),
            ("breadcrumb_font_size", "0.8125rem"),
            ("breadcrumb_font_color", "#6B7280"),
            ("breadcrumb_separator", "/"),
            ("breadcrumb_background_color", "#FFFFFF"),
            ("pagination_font_size", "0.9375rem"),
            ("pagination_active_color", "#2563EB"),
            ("pagination_inactive_color", "#9CA3AF"),
            ("pagination_border_color", "#E5E7EB"),
            ("menu_background_color", "#111827"),
            ("menu_font_color", "#F9FAFB"),
            ("menu_hover_color", "#2563EB"),
            ("menu_font_size", "0.9375rem"),
            ("footer_background_color", "#111827"),
            ("footer_font_color", "#D1D5DB"),
            ("footer_link_color", "#60A5FA"),
            ("footer_font_size", "0.875rem"),
            ("header_background_color", "#FFFFFF"),
            ("header_height", "64px"),
            ("logo_height", "40px"),
            ("logo_max_width", "200px"),
            ("button_background_color", "#2563EB"),
            ("button_font_color", "#FFFFFF"),
        ],
    )
}

/// Serif book styling on warm paper tones.
pub fn traditional() -> Preset {
    Preset::from_pairs(
        "traditional",
        &[
            ("heading_font_family", "Georgia, serif"),
            ("body_font_family", "Georgia, serif"),
            ("h1_font_size", "2.5rem"),
            ("h1_font_color", "#1F3A5F"),
            ("h2_font_size", "2rem"),
            ("h2_font_color", "#1F3A5F"),
            ("h3_font_size", "1.5rem"),
            ("h3_font_color", "#2C3E50"),
            ("h4_font_size", "1.25rem"),
            ("h4_font_color", "#2C3E50"),
            ("heading_transform", "none"),
            ("body_font_size", "1.0625rem"),
            ("body_font_color", "#2F2F2F"),
            ("body_background_color", "#FBF8F3"),
            ("caption_font_size", "0.875rem"),
            ("caption_font_color", "#6E6657"),
            ("link_color", "#7A4A21"),
            ("link_hover_color", "#5C3717"),
            ("link_underline", "always"),
            ("primary_color", "#1F3A5F"),
            ("secondary_color", "#7A4A21"),
            ("accent_color", "#9C6B2F"),
            ("muted_color", "#8A8272"),
            ("border_color", "#D8CFBF"),
            ("blockquote_border_color", "#9C6B2F"),
            ("blockquote_font_color", "#4A4436"),
            ("toc_font_size", "1rem"),
            ("toc_font_color", "#2F2F2F"),
            ("toc_background_color", "#F4EEE2"),
            ("toc_border_color", "#D8CFBF"),
            ("toc_indent_size", "1.5rem"),
            ("toc_heading_transform", "capitalize"),
            ("breadcrumb_font_size", "0.875rem"),
            ("breadcrumb_font_color", "#6E6657"),
            ("breadcrumb_separator", "\u{203a}"),
            ("breadcrumb_background_color", "#FBF8F3"),
            ("pagination_font_size", "1rem"),
            ("pagination_active_color", "#1F3A5F"),
            ("pagination_inactive_color", "#8A8272"),
            ("pagination_border_color", "#D8CFBF"),
            ("menu_background_color", "#1F3A5F"),
            ("menu_font_color", "#FBF8F3"),
            ("menu_hover_color", "#9C6B2F"),
            ("menu_font_size", "1rem"),
            ("footer_background_color", "#2C3E50"),
            ("footer_font_color", "#D8CFBF"),
            ("footer_link_color", "#C9A468"),
            ("footer_font_size", "0.875rem"),
            ("header_background_color", "#FBF8F3"),
            ("header_height", "80px"),
            ("logo_height", "48px"),
            ("logo_max_width", "240px"),
            ("button_background_color", "#1F3A5F"),
            ("button_font_color", "#FBF8F3"),
        ],
    )
}

/// Spare monochrome layout with generous spacing.
pub fn minimal() -> Preset {
    Preset::from_pairs(
        "minimal",
        &[
            ("heading_font_family", "Helvetica Neue, sans-serif"),
            ("body_font_family", "Helvetica Neue, sans-serif"),
            ("h1_font_size", "2rem"),
            ("h1_font_color", "#000000"),
            ("h2_font_size", "1.5rem"),
            ("h2_font_color", "#000000"),
            ("h3_font_size", "1.25rem"),
            ("h3_font_color", "#1A1A1A"),
            ("h4_font_size", "1.0625rem"),
            ("h4_font_color", "#1A1A1A"),
            ("heading_transform", "none"),
            ("body_font_size", "1rem"),
            ("body_font_color", "#222222"),
            ("body_background_color", "#FFFFFF"),
            ("caption_font_size", "0.8125rem"),
            ("caption_font_color", "#777777"),
            ("link_color", "#000000"),
            ("link_hover_color", "#555555"),
            ("link_underline", "always"),
            ("primary_color", "#000000"),
            ("secondary_color", "#555555"),
            ("accent_color", "#888888"),
            ("muted_color", "#AAAAAA"),
            ("border_color", "#EEEEEE"),
            ("blockquote_border_color", "#DDDDDD"),
            ("blockquote_font_color", "#444444"),
            ("toc_font_size", "0.875rem"),
            ("toc_font_color", "#222222"),
            ("toc_background_color", "#FFFFFF"),
            ("toc_border_color", "#EEEEEE"),
            ("toc_indent_size", "1rem"),
            ("toc_heading_transform", "none"),
            ("breadcrumb_font_size", "0.75rem"),
            ("breadcrumb_font_color", "#777777"),
            ("breadcrumb_separator", "\u{2192}"),
            ("breadcrumb_background_color", "#FFFFFF"),
            ("pagination_font_size", "0.875rem"),
            ("pagination_active_color", "#000000"),
            ("pagination_inactive_color", "#AAAAAA"),
            ("pagination_border_color", "#EEEEEE"),
            ("menu_background_color", "#FFFFFF"),
            ("menu_font_color", "#000000"),
            ("menu_hover_color", "#555555"),
            ("menu_font_size", "0.875rem"),
            ("footer_background_color", "#FFFFFF"),
            ("footer_font_color", "#777777"),
            ("footer_link_color", "#000000"),
            ("footer_font_size", "0.8125rem"),
            ("header_background_color", "#FFFFFF"),
            ("header_height", "56px"),
            ("logo_height", "32px"),
            ("logo_max_width", "160px"),
            ("button_background_color", "#000000"),
            ("button_font_color", "#FFFFFF"),
        ],
    )
}

/// High-contrast dark palette for accessibility-focused sites.
pub fn contrast() -> Preset {
    Preset::from_pairs(
        "contrast",
        &[
            ("heading_font_family", "Verdana, sans-serif"),
            ("body_font_family", "Verdana, sans-serif"),
            ("h1_font_size", "2.25rem"),
            ("h1_font_color", "#FFFFFF"),
            ("h2_font_size", "1.75rem"),
            ("h2_font_color", "#FFFFFF"),
            ("h3_font_size", "1.375rem"),
            ("h3_font_color", "#F2F2F2"),
            ("h4_font_size", "1.125rem"),
            ("h4_font_color", "#F2F2F2"),
            ("heading_transform", "none"),
            ("body_font_size", "1.125rem"),
            ("body_font_color", "#F2F2F2"),
            ("body_background_color", "#0B0B0B"),
            ("caption_font_size", "1rem"),
            ("caption_font_color", "#CFCFCF"),
            ("link_color", "#FFD600"),
            ("link_hover_color", "#FFEA70"),
            ("link_underline", "always"),
            ("primary_color", "#FFD600"),
            ("secondary_color", "#00E5FF"),
            ("accent_color", "#FF5252"),
            ("muted_color", "#BDBDBD"),
            ("border_color", "#515151"),
            ("blockquote_border_color", "#FFD600"),
            ("blockquote_font_color", "#E6E6E6"),
            ("toc_font_size", "1.0625rem"),
            ("toc_font_color", "#F2F2F2"),
            ("toc_background_color", "#161616"),
            ("toc_border_color", "#515151"),
            ("toc_indent_size", "1.5rem"),
            ("toc_heading_transform", "uppercase"),
            ("breadcrumb_font_size", "1rem"),
            ("breadcrumb_font_color", "#CFCFCF"),
            ("breadcrumb_separator", "/"),
            ("breadcrumb_background_color", "#0B0B0B"),
            ("pagination_font_size", "1.0625rem"),
            ("pagination_active_color", "#FFD600"),
            ("pagination_inactive_color", "#BDBDBD"),
            ("pagination_border_color", "#515151"),
            ("menu_background_color", "#000000"),
            ("menu_font_color", "#FFFFFF"),
            ("menu_hover_color", "#FFD600"),
            ("menu_font_size", "1.0625rem"),
            ("footer_background_color", "#000000"),
            ("footer_font_color", "#E6E6E6"),
            ("footer_link_color", "#FFD600"),
            ("footer_font_size", "1rem"),
            ("header_background_color", "#000000"),
            ("header_height", "72px"),
            ("logo_height", "44px"),
            ("logo_max_width", "220px"),
            ("button_background_color", "#FFD600"),
            ("button_font_color", "#0B0B0B"),
        ],
    )
}
