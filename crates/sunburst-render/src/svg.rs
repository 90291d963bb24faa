use crate::config::ChartOptions;
use crate::model::{DetailLineKind, LabelTransform, Scene, SceneDetail};
use std::fmt::Write as _;

/// JS `Number#toString()`-style formatting for SVG attributes, without `-0` or float noise.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

/// `d3-path` rounding: at most 3 fractional digits, ties half-up.
pub(crate) fn fmt_path(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut r = (v * 1000.0 + 0.5).floor() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `rotate(θ-90) translate(r,0) rotate(0|180)`.
pub fn label_transform_attr(t: &LabelTransform) -> String {
    format!(
        "rotate({}) translate({},0) rotate({})",
        fmt(t.rotate_deg),
        fmt(t.translate_x),
        if t.flipped { 180 } else { 0 }
    )
}

fn render_detail(out: &mut String, detail: &SceneDetail, options: &ChartOptions) {
    let panel = &detail.panel;
    let _ = write!(
        out,
        r#"<g class="detail" fill="{}" text-anchor="middle" opacity="{}">"#,
        escape_xml(&options.theme.detail_fill),
        fmt(detail.opacity)
    );
    for line in &panel.lines {
        let style = match line.kind {
            DetailLineKind::Title => r#" font-style="italic""#,
            DetailLineKind::Body => "",
        };
        let text = format!(
            r#"<text x="{}" y="{}" font-size="{}"{}>{}</text>"#,
            fmt(line.x),
            fmt(line.y),
            fmt(line.font_size),
            style,
            escape_xml(&line.text)
        );
        match &line.href {
            Some(href) => {
                let _ = write!(
                    out,
                    r#"<a href="{}" target="_blank">{}</a>"#,
                    escape_xml(href),
                    text
                );
            }
            None => out.push_str(&text),
        }
    }
    out.push_str("</g>");
}

/// Serializes one frame to a standalone SVG document centered on the chart origin.
pub fn render_scene_svg(scene: &Scene, options: &ChartOptions) -> String {
    let mut out = String::new();
    let w = scene.width;
    let h = scene.height;

    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="sunburst" viewBox="{} {} {} {}" width="{}" height="{}" style="max-width: 100%; height: auto; font: {}px {};">"#,
        fmt(-w / 2.0),
        fmt(-h / 2.0),
        fmt(w),
        fmt(w),
        fmt(w),
        fmt(h),
        fmt(options.font_size),
        escape_xml(&options.font_family)
    );

    out.push_str(r#"<g class="arcs">"#);
    for arc in &scene.arcs {
        let _ = write!(
            &mut out,
            r#"<path data-id="{}" fill="{}" fill-opacity="{}" pointer-events="{}"{} d="{}"><title>{}</title></path>"#,
            arc.id.index(),
            escape_xml(&arc.fill),
            fmt(arc.fill_opacity),
            if arc.interactive { "auto" } else { "none" },
            if arc.selected { r#" class="selected""# } else { "" },
            arc.path,
            escape_xml(&arc.title)
        );
    }
    out.push_str("</g>");

    let _ = write!(
        &mut out,
        r#"<g class="labels" pointer-events="none" text-anchor="middle" style="user-select: none;" fill="{}" font-weight="700">"#,
        escape_xml(&options.theme.label_fill)
    );
    for label in &scene.labels {
        let _ = write!(
            &mut out,
            r#"<text data-id="{}" dy="0.35em" fill-opacity="{}" transform="{}">{}</text>"#,
            label.id.index(),
            fmt(label.opacity),
            label_transform_attr(&label.transform),
            escape_xml(&label.text)
        );
    }
    out.push_str("</g>");

    let _ = write!(
        &mut out,
        r#"<circle class="center" data-target="{}" r="{}" fill="none" pointer-events="all"/>"#,
        scene.center_target.index(),
        fmt(scene.radius)
    );

    if let Some(detail) = &scene.detail {
        render_detail(&mut out, detail, options);
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_strips_noise_and_negative_zero() {
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1e-12), "0");
        assert_eq!(fmt(155.33333333333334), "155.33333333333334");
        assert_eq!(fmt(2.0000000001), "2");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn fmt_path_rounds_to_three_digits() {
        assert_eq!(fmt_path(1.23456), "1.235");
        assert_eq!(fmt_path(-0.0001), "0");
        assert_eq!(fmt_path(10.5), "10.5");
        assert_eq!(fmt_path(-2.0), "-2");
    }

    #[test]
    fn label_transform_flips_on_the_left_half() {
        let t = LabelTransform {
            rotate_deg: 180.0,
            translate_x: 232.5,
            flipped: true,
        };
        assert_eq!(
            label_transform_attr(&t),
            "rotate(180) translate(232.5,0) rotate(180)"
        );
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
