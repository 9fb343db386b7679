//! DOM cleaning walk
//!
//! Applies a [`SanitizePolicy`] to a parsed DOM in place. Elements outside
//! the allow-list are dropped with their whole subtree; surviving elements
//! lose any attribute the policy does not permit, and URL-bearing attribute
//! values are dropped when their scheme is not allowed. Text is never
//! rewritten. The walk cannot fail: unsafe content is removed, not
//! reported, because the render path has no channel back to the author.

use super::SanitizePolicy;
use markup5ever_rcdom::{Handle, NodeData};

/// Sanitize every child of `parent` in place, recursively.
pub fn sanitize_children(parent: &Handle, policy: &SanitizePolicy) {
    let children: Vec<Handle> = parent.children.borrow().clone();
    let mut kept = Vec::with_capacity(children.len());

    for child in children {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.as_ref().to_ascii_lowercase();
                if !policy.allows_tag(&tag) {
                    continue;
                }
                attrs.borrow_mut().retain(|attr| {
                    let attr_name = attr.name.local.as_ref().to_ascii_lowercase();
                    if !policy.allows_attribute(&tag, &attr_name) {
                        return false;
                    }
                    if policy.is_url_attribute(&attr_name)
                        && !policy.allows_url(&tag, &attr_name, attr.value.trim())
                    {
                        return false;
                    }
                    true
                });
                sanitize_children(&child, policy);
                kept.push(child);
            }
            NodeData::Text { .. } => kept.push(child),
            // Comments, doctypes and processing instructions never render
            _ => {}
        }
    }

    *parent.children.borrow_mut() = kept;
}
