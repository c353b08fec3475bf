use std::path::{Component, Path, PathBuf};

/// Canonical form of `path` when it exists, otherwise an absolute,
/// lexically normalized form. Only meant for messages.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical) = path.canonicalize() {
        return canonical.display().to_string();
    }

    let absolute = match std::env::current_dir() {
        Ok(current_dir) if path.is_relative() => current_dir.join(path),
        _ => path.to_path_buf(),
    };
    normalize(&absolute).display().to_string()
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut components, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !matches!(components.last(), None | Some(Component::RootDir)) {
                        components.pop();
                    }
                }
                _ => components.push(component),
            }
            components
        })
        .iter()
        .collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
