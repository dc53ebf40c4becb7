use crate::error::{ReleaseError, Result};
use git2::{Repository, RepositoryOpenFlags as OpenFlags};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locates the working directory of the repository enclosing `path`.
///
/// Release commands are run from here so the tool behaves the same from any
/// subdirectory. Like git itself, the search honors `GIT_DIR` and
/// `GIT_CEILING_DIRECTORIES`.
pub fn discover_root<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let repo = Repository::open_ext(
        path.as_ref(),
        OpenFlags::FROM_ENV,
        std::iter::empty::<&OsStr>(),
    )?;
    workdir_of(&repo)
}

/// Like [discover_root], but the upward search never enters `ceiling`.
pub fn discover_root_below<P, C>(path: P, ceiling: C) -> Result<PathBuf>
where
    P: AsRef<Path>,
    C: AsRef<Path>,
{
    let repo = Repository::open_ext(
        path.as_ref(),
        OpenFlags::empty(),
        [ceiling.as_ref().as_os_str()],
    )?;
    workdir_of(&repo)
}

fn workdir_of(repo: &Repository) -> Result<PathBuf> {
    repo.workdir().map(Path::to_path_buf).ok_or_else(|| {
        ReleaseError::Git(git2::Error::from_str(
            "Bare repositories have no working directory to release from",
        ))
    })
}

/// Resolves the default branch advertised by `remote`.
///
/// Reads the symbolic ref `refs/remotes/<remote>/HEAD` (written by
/// `git clone` or `git remote set-head`) and returns the branch it points to.
/// Returns `Ok(None)` when the ref is missing or not symbolic.
pub fn resolve_default_branch<P: AsRef<Path>>(root: P, remote: &str) -> Result<Option<String>> {
    let repo = Repository::open(root)?;
    let head_ref = format!("refs/remotes/{}/HEAD", remote);

    let reference = match repo.find_reference(&head_ref) {
        Ok(reference) => reference,
        Err(e) if e.code() == git2::ErrorCode::NotFound => {
            log::debug!("{} not found, no default branch advertised", head_ref);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let prefix = format!("refs/remotes/{}/", remote);
    let branch = reference
        .symbolic_target()
        .and_then(|target| target.strip_prefix(&prefix))
        .filter(|branch| !branch.is_empty())
        .map(str::to_string);

    Ok(branch)
}
