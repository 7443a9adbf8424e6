use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::FrontendError;

use super::types::{
    ColorModeDescriptor, ColorPreference, FrontendDescriptor, HeadLink, TailwindDescriptor,
};

/// One merged key and the file it came from.
struct Slot<T> {
    value: Option<(T, PathBuf)>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Clone + PartialEq> Slot<T> {
    fn offer(
        &mut self,
        field: &'static str,
        candidate: Option<&T>,
        origin: &Path,
        prefer: Option<&Path>,
    ) -> Result<(), FrontendError> {
        let Some(candidate) = candidate else {
            return Ok(());
        };
        match &self.value {
            None => {
                self.value = Some((candidate.clone(), origin.to_path_buf()));
            }
            Some((current, _)) if current == candidate => {}
            Some((_, current_origin)) => {
                if prefer == Some(origin) {
                    debug!(
                        "'{}' taken from preferred '{}' over '{}'",
                        field,
                        origin.display(),
                        current_origin.display()
                    );
                    self.value = Some((candidate.clone(), origin.to_path_buf()));
                } else if prefer != Some(current_origin.as_path()) {
                    return Err(FrontendError::ConflictingDefinition {
                        field,
                        left: current_origin.clone(),
                        right: origin.to_path_buf(),
                    });
                }
            }
        }
        Ok(())
    }

    fn take(self) -> Option<T> {
        self.value.map(|(value, _)| value)
    }
}

#[derive(Default)]
struct Merged {
    compatibility_date: Slot<String>,
    devtools: Slot<bool>,
    modules: Slot<Vec<String>>,
    css: Slot<Vec<String>>,
    links: Slot<Vec<HeadLink>>,
    preference: Slot<ColorPreference>,
    data_value: Slot<String>,
    class_suffix: Slot<String>,
    content: Slot<Vec<String>>,
    sans_font: Slot<Vec<String>>,
    plugins: Slot<Vec<String>>,
    themes: Slot<Vec<String>>,
}

/// Merges descriptor variants key by key. Keys set by one variant, or set
/// identically by several, merge; differing keys need `prefer` to name the
/// variant that wins.
///
/// # Errors
///
/// Returns an error when no variants are given, `prefer` is not one of them,
/// or a key differs between variants and `prefer` does not settle it.
pub fn unify(
    variants: &[(PathBuf, FrontendDescriptor)],
    prefer: Option<&Path>,
) -> Result<FrontendDescriptor, FrontendError> {
    if variants.is_empty() {
        return Err(FrontendError::NothingToUnify);
    }
    if let Some(prefer) = prefer
        && !variants.iter().any(|(path, _)| path == prefer)
    {
        return Err(FrontendError::PreferredNotInInputs {
            path: prefer.to_path_buf(),
        });
    }

    let mut merged = Merged::default();
    for (origin, descriptor) in variants {
        let color_mode = descriptor.color_mode.as_ref();
        let tailwind = descriptor.tailwind.as_ref();
        merged.compatibility_date.offer(
            "compatibility_date",
            descriptor.compatibility_date.as_ref(),
            origin,
            prefer,
        )?;
        merged
            .devtools
            .offer("devtools", descriptor.devtools.as_ref(), origin, prefer)?;
        merged
            .modules
            .offer("modules", descriptor.modules.as_ref(), origin, prefer)?;
        merged
            .css
            .offer("css", descriptor.css.as_ref(), origin, prefer)?;
        merged
            .links
            .offer("links", descriptor.links.as_ref(), origin, prefer)?;
        merged.preference.offer(
            "color_mode.preference",
            color_mode.and_then(|mode| mode.preference.as_ref()),
            origin,
            prefer,
        )?;
        merged.data_value.offer(
            "color_mode.data_value",
            color_mode.and_then(|mode| mode.data_value.as_ref()),
            origin,
            prefer,
        )?;
        merged.class_suffix.offer(
            "color_mode.class_suffix",
            color_mode.and_then(|mode| mode.class_suffix.as_ref()),
            origin,
            prefer,
        )?;
        merged.content.offer(
            "tailwind.content",
            tailwind.and_then(|config| config.content.as_ref()),
            origin,
            prefer,
        )?;
        merged.sans_font.offer(
            "tailwind.sans_font",
            tailwind.and_then(|config| config.sans_font.as_ref()),
            origin,
            prefer,
        )?;
        merged.plugins.offer(
            "tailwind.plugins",
            tailwind.and_then(|config| config.plugins.as_ref()),
            origin,
            prefer,
        )?;
        merged.themes.offer(
            "tailwind.themes",
            tailwind.and_then(|config| config.themes.as_ref()),
            origin,
            prefer,
        )?;
    }

    let color_mode = ColorModeDescriptor {
        preference: merged.preference.take(),
        data_value: merged.data_value.take(),
        class_suffix: merged.class_suffix.take(),
    };
    let tailwind = TailwindDescriptor {
        content: merged.content.take(),
        sans_font: merged.sans_font.take(),
        plugins: merged.plugins.take(),
        themes: merged.themes.take(),
    };
    Ok(FrontendDescriptor {
        compatibility_date: merged.compatibility_date.take(),
        devtools: merged.devtools.take(),
        modules: merged.modules.take(),
        css: merged.css.take(),
        links: merged.links.take(),
        color_mode: (color_mode != ColorModeDescriptor::default()).then_some(color_mode),
        tailwind: (tailwind != TailwindDescriptor::default()).then_some(tailwind),
    })
}
