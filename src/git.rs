use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::{FixedOffset, TimeZone};
use git2::{Oid, Repository, Sort};

/// One commit of the history to render, in the order the walk produced it.
pub struct CommitRecord {
    /// Full hex object id.
    pub id: String,
    /// Abbreviated hash respecting the repo's core.abbrev setting.
    pub short_id: String,
    /// Parent ids, first parent first. Boundary records keep their real
    /// parents even though those commits are never walked.
    pub parents: Vec<String>,
    /// The commit sits on the edge of the traversed range.
    pub is_boundary: bool,
    pub author: String,
    /// Preformatted author date, `YYYY-MM-DD HH:MM ±HHMM`.
    pub date: String,
    /// Decorations pointing at this commit: `[branch]`, `{remote}`, `<tag>`.
    pub refs: Vec<String>,
    /// First line of the commit message.
    pub summary: String,
}

/// What part of the history to walk.
#[derive(Default)]
pub struct WalkOptions {
    /// Revision or range (`a..b`) to start from. Defaults to HEAD.
    pub revision: Option<String>,
    /// Walk every ref instead of just HEAD.
    pub all: bool,
    /// Stop after this many commits.
    pub max_count: Option<usize>,
    /// Append the unwalked parents at the edge of the range as boundary
    /// records.
    pub boundary: bool,
}

/// Discover the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::discover(".").context("not a git repository (or any of its parent directories)")
}

/// Walk the requested slice of history in topological order (children
/// before parents) and return one record per commit, decorated with the
/// refs that point at it.
pub fn walk_history(repo: &Repository, opts: &WalkOptions) -> Result<Vec<CommitRecord>> {
    let decorations = collect_decorations(repo)?;

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL)?;

    if opts.all {
        revwalk
            .push_glob("refs/*")
            .context("failed to push refs onto the revision walk")?;
        // A detached HEAD is not under refs/*.
        revwalk.push_head().ok();
    } else if let Some(rev) = &opts.revision {
        if rev.contains("..") {
            revwalk
                .push_range(rev)
                .with_context(|| format!("invalid revision range '{}'", rev))?;
        } else {
            let commit = repo
                .revparse_single(rev)
                .with_context(|| format!("unknown revision '{}'", rev))?
                .peel_to_commit()
                .with_context(|| format!("'{}' does not point to a commit", rev))?;
            revwalk.push(commit.id())?;
        }
    } else {
        revwalk
            .push_head()
            .context("HEAD does not point to a commit")?;
    }

    let mut walked = Vec::new();
    for oid in revwalk {
        walked.push(oid?);
        if opts.max_count.is_some_and(|max| walked.len() >= max) {
            break;
        }
    }

    let walked_set: HashSet<Oid> = walked.iter().copied().collect();
    let mut records = Vec::with_capacity(walked.len());
    for oid in &walked {
        records.push(commit_record(repo, *oid, &decorations, false)?);
    }

    if opts.boundary {
        append_boundary_records(repo, &walked_set, &decorations, &mut records)?;
    }

    Ok(records)
}

/// Append the frontier of the walk: every parent referenced by a walked
/// commit but not itself walked becomes a boundary record, in the order
/// the walk first referenced it.
fn append_boundary_records(
    repo: &Repository,
    walked: &HashSet<Oid>,
    decorations: &HashMap<Oid, Vec<String>>,
    records: &mut Vec<CommitRecord>,
) -> Result<()> {
    let mut seen: HashSet<Oid> = HashSet::new();
    let mut frontier = Vec::new();

    for record in records.iter() {
        for parent in &record.parents {
            let oid = Oid::from_str(parent)?;
            if !walked.contains(&oid) && seen.insert(oid) {
                frontier.push(oid);
            }
        }
    }

    for oid in frontier {
        records.push(commit_record(repo, oid, decorations, true)?);
    }

    Ok(())
}

fn commit_record(
    repo: &Repository,
    oid: Oid,
    decorations: &HashMap<Oid, Vec<String>>,
    is_boundary: bool,
) -> Result<CommitRecord> {
    let commit = repo.find_commit(oid)?;

    let short_id = commit
        .as_object()
        .short_id()?
        .as_str()
        .unwrap_or("")
        .to_string();
    let parents: Vec<String> = commit.parent_ids().map(|p| p.to_string()).collect();
    let author = commit.author();

    Ok(CommitRecord {
        id: oid.to_string(),
        short_id,
        parents,
        is_boundary,
        author: author.name().unwrap_or("").to_string(),
        date: format_time(&author.when()),
        refs: decorations.get(&oid).cloned().unwrap_or_default(),
        summary: commit.summary().unwrap_or("").to_string(),
    })
}

/// Map each commit to the decoration strings of the refs pointing at it:
/// local branches as `[name]` (the checked-out branch first), remote
/// branches as `{name}`, tags as `<name>`.
fn collect_decorations(repo: &Repository) -> Result<HashMap<Oid, Vec<String>>> {
    let head_branch = repo
        .head()
        .ok()
        .filter(|h| h.is_branch())
        .and_then(|h| h.shorthand().map(str::to_string));

    let mut locals: HashMap<Oid, Vec<String>> = HashMap::new();
    let mut remotes: HashMap<Oid, Vec<String>> = HashMap::new();
    let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

    for reference in repo.references()? {
        let reference = reference?;
        let Some(name) = reference.shorthand().map(str::to_string) else {
            continue;
        };
        // Skip symbolic pointers like origin/HEAD.
        if name.ends_with("/HEAD") {
            continue;
        }
        let Ok(commit) = reference.peel_to_commit() else {
            continue;
        };
        let oid = commit.id();

        if reference.is_branch() {
            let entry = locals.entry(oid).or_default();
            if head_branch.as_deref() == Some(name.as_str()) {
                entry.insert(0, format!("[{}]", name));
            } else {
                entry.push(format!("[{}]", name));
            }
        } else if reference.is_remote() {
            remotes.entry(oid).or_default().push(format!("{{{}}}", name));
        } else if reference.is_tag() {
            tags.entry(oid).or_default().push(format!("<{}>", name));
        }
    }

    let mut decorations = locals;
    for (oid, mut names) in remotes {
        decorations.entry(oid).or_default().append(&mut names);
    }
    for (oid, mut names) in tags {
        decorations.entry(oid).or_default().append(&mut names);
    }

    Ok(decorations)
}

/// Format a git timestamp in its author-local offset.
fn format_time(time: &git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    offset
        .timestamp_opt(time.seconds(), 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M %z").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "git_test.rs"]
mod tests;
