use super::WorkItem;

const MAX_SLUG_LEN: usize = 40;

/// Branch name offered to the user for a work item.
///
/// `workitem/{id}-{slug}` where the slug is the title lowercased with every run
/// of non-alphanumeric characters collapsed to `-`, or `workitem/{id}` when the
/// title has nothing usable.
pub fn suggested_branch_name(work_item: &WorkItem) -> String {
    let slug = slugify(work_item.title());
    if slug.is_empty() {
        format!("workitem/{}", work_item.id)
    } else {
        format!("workitem/{}-{}", work_item.id, slug)
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }

        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_owned()
}
