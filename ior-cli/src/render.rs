use ior_common::Material;

/// Text card for one material, mirroring what the catalog grid shows.
pub fn material_card(material: &Material) -> String {
    let mut out = format!(
        "{}  [{}]  IOR: {}\n  id: {}",
        material.name,
        material.category,
        material.display_ior(),
        material.id
    );

    if let Some(description) = material.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str("\n  ");
        out.push_str(description);
    }

    let conditions: Vec<String> = [material.display_wavelength(), material.display_temperature()]
        .into_iter()
        .flatten()
        .collect();
    if !conditions.is_empty() {
        out.push_str("\n  ");
        out.push_str(&conditions.join(" · "));
    }

    if let Some(source) = material.source.as_deref().filter(|s| !s.is_empty()) {
        out.push_str("\n  Source: ");
        out.push_str(source);
    }

    out
}

pub fn summary(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} materials")
}
