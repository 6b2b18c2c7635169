use std::collections::{HashMap, HashSet};

/// Compute display labels for a set of working directories.
///
/// Each directory is labeled with its shortest trailing run of path
/// components that is unique across the set: `/a/X/Z` and `/b/Y/Z` become
/// `X/Z` and `Y/Z`, while unrelated paths keep their final component. A
/// single directory always gets its final component; paths that collide at
/// every depth share their full component join.
///
/// Labels use `/` separators and never carry a leading slash, so they are
/// safe to use as destination subdirectory names.
pub fn project_labels(cwds: &[String]) -> HashMap<String, String> {
    let mut labels = HashMap::new();

    let unique: Vec<&str> = {
        let mut seen = HashSet::new();
        cwds.iter().map(String::as_str).filter(|cwd| seen.insert(*cwd)).collect()
    };

    if unique.is_empty() {
        return labels;
    }
    if unique.len() == 1 {
        let cwd = unique[0];
        labels.insert(cwd.to_string(), final_component(cwd));
        return labels;
    }

    let parts: HashMap<&str, Vec<&str>> =
        unique.iter().map(|cwd| (*cwd, split_components(cwd))).collect();

    let mut remaining: HashSet<&str> = unique.iter().copied().collect();
    let max_depth = parts.values().map(Vec::len).max().unwrap_or(0);

    for depth in 1..=max_depth {
        if remaining.is_empty() {
            break;
        }

        // Trailing-component keys at this depth, for unresolved paths only
        let keys: HashMap<&str, String> =
            remaining.iter().map(|cwd| (*cwd, trailing_key(&parts[cwd], depth))).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for key in keys.values() {
            *counts.entry(key.as_str()).or_insert(0) += 1;
        }

        for (cwd, key) in &keys {
            if counts[key.as_str()] == 1 {
                labels.insert((*cwd).to_string(), key.clone());
                remaining.remove(*cwd);
            }
        }
    }

    // Paths still colliding at full depth share their full component join
    for cwd in remaining {
        let full = parts[cwd].join("/");
        let label = if full.is_empty() { cwd.to_string() } else { full };
        labels.insert(cwd.to_string(), label);
    }

    labels
}

/// Split a path into its non-empty components, dropping the root.
fn split_components(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

/// The last `depth` components joined with `/`, or all of them when the
/// path is shorter.
fn trailing_key(parts: &[&str], depth: usize) -> String {
    if depth <= parts.len() {
        parts[parts.len() - depth..].join("/")
    } else {
        parts.join("/")
    }
}

fn final_component(cwd: &str) -> String {
    split_components(cwd).last().map(|part| (*part).to_string()).unwrap_or_default()
}
