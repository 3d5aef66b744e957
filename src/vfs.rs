//! In-memory virtual filesystem.
//!
//! A nested tree of directories and string files with Unix-style path
//! resolution. State lives only for the process lifetime; there is no
//! persistence by design.

use std::collections::BTreeMap;

use thiserror::Error;

pub const HOME_DIR: &str = "/home/user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VfsError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a directory")]
    NotADirectory,
    #[error("Is a directory")]
    IsADirectory,
    #[error("File exists")]
    AlreadyExists,
}

#[derive(Debug, Clone)]
pub enum Node {
    Dir(BTreeMap<String, Node>),
    File(String),
}

impl Node {
    fn dir() -> Node {
        Node::Dir(BTreeMap::new())
    }

    fn file(content: &str) -> Node {
        Node::File(content.to_string())
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: usize,
}

#[derive(Debug)]
pub struct VirtualFs {
    root: Node,
    current_path: String,
}

impl VirtualFs {
    pub fn new() -> Self {
        Self {
            root: seed_tree(),
            current_path: HOME_DIR.to_string(),
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Expand `path` against the working directory: `~`, absolute, `.`,
    /// `..` and plain relative names.
    pub fn resolve_path(&self, path: &str) -> String {
        if path == "~" {
            return HOME_DIR.to_string();
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return format!("{HOME_DIR}/{rest}");
        }
        if path.starts_with('/') {
            return path.to_string();
        }
        let mut parts: Vec<&str> = self
            .current_path
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            match part {
                "." => {}
                ".." => {
                    parts.pop();
                }
                name => parts.push(name),
            }
        }
        format!("/{}", parts.join("/"))
    }

    fn node(&self, path: &str) -> Result<&Node, VfsError> {
        let mut node = &self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let Node::Dir(children) = node else {
                return Err(VfsError::NotADirectory);
            };
            node = children.get(part).ok_or(VfsError::NotFound)?;
        }
        Ok(node)
    }

    /// Split `path` into its parent directory map and final component.
    fn parent_dir_mut(
        &mut self,
        path: &str,
    ) -> Result<(&mut BTreeMap<String, Node>, String), VfsError> {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let name = parts.pop().ok_or(VfsError::AlreadyExists)?;
        let mut node = &mut self.root;
        for part in parts {
            let Node::Dir(children) = node else {
                return Err(VfsError::NotADirectory);
            };
            node = children.get_mut(part).ok_or(VfsError::NotFound)?;
        }
        match node {
            Node::Dir(children) => Ok((children, name.to_string())),
            Node::File(_) => Err(VfsError::NotADirectory),
        }
    }

    pub fn change_directory(&mut self, path: &str) -> Result<String, VfsError> {
        let resolved = self.resolve_path(path);
        match self.node(&resolved)? {
            Node::Dir(_) => {
                self.current_path = resolved.clone();
                Ok(resolved)
            }
            Node::File(_) => Err(VfsError::NotADirectory),
        }
    }

    pub fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, VfsError> {
        let resolved = self.resolve_path(path);
        match self.node(&resolved)? {
            Node::Dir(children) => Ok(children
                .iter()
                .map(|(name, node)| DirEntry {
                    name: name.clone(),
                    is_dir: node.is_dir(),
                    size: match node {
                        Node::File(content) => content.len(),
                        Node::Dir(_) => 0,
                    },
                })
                .collect()),
            Node::File(_) => Err(VfsError::NotADirectory),
        }
    }

    pub fn read_file(&self, path: &str) -> Result<String, VfsError> {
        let resolved = self.resolve_path(path);
        match self.node(&resolved)? {
            Node::File(content) => Ok(content.clone()),
            Node::Dir(_) => Err(VfsError::IsADirectory),
        }
    }

    /// Create or overwrite a file. The parent directory must exist.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<(), VfsError> {
        let resolved = self.resolve_path(path);
        let (dir, name) = self.parent_dir_mut(&resolved)?;
        if matches!(dir.get(&name), Some(Node::Dir(_))) {
            return Err(VfsError::IsADirectory);
        }
        dir.insert(name, Node::File(content.to_string()));
        Ok(())
    }

    pub fn create_directory(&mut self, path: &str) -> Result<(), VfsError> {
        let resolved = self.resolve_path(path);
        let (dir, name) = self.parent_dir_mut(&resolved)?;
        if dir.contains_key(&name) {
            return Err(VfsError::AlreadyExists);
        }
        dir.insert(name, Node::dir());
        Ok(())
    }

    /// Remove a file or directory subtree.
    pub fn remove(&mut self, path: &str) -> Result<(), VfsError> {
        let resolved = self.resolve_path(path);
        let (dir, name) = self.parent_dir_mut(&resolved)?;
        dir.remove(&name).map(|_| ()).ok_or(VfsError::NotFound)
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_tree() -> Node {
    let mut documents = BTreeMap::new();
    documents.insert(
        "readme.txt".to_string(),
        Node::file(
            "Welcome!\n\nThis is a simulated Unix desktop environment.\n\n\
             You can use the terminal to navigate the filesystem.",
        ),
    );
    documents.insert("notes.txt".to_string(), Node::file("My notes..."));

    let mut user = BTreeMap::new();
    user.insert("documents".to_string(), Node::Dir(documents));
    user.insert("downloads".to_string(), Node::dir());
    user.insert(
        ".profile".to_string(),
        Node::file("# User profile\nexport PATH=/usr/bin:/bin\n"),
    );

    let mut home = BTreeMap::new();
    home.insert("user".to_string(), Node::Dir(user));

    let mut share = BTreeMap::new();
    share.insert("doc".to_string(), Node::dir());
    let mut usr = BTreeMap::new();
    usr.insert("bin".to_string(), Node::dir());
    usr.insert("lib".to_string(), Node::dir());
    usr.insert("share".to_string(), Node::Dir(share));

    let mut etc = BTreeMap::new();
    etc.insert("hosts".to_string(), Node::file("127.0.0.1  localhost\n"));
    etc.insert(
        "passwd".to_string(),
        Node::file("root:x:0:0:root:/root:/bin/sh\nuser:x:1000:1000:User:/home/user:/bin/sh\n"),
    );

    let mut var = BTreeMap::new();
    var.insert("log".to_string(), Node::dir());

    let mut root = BTreeMap::new();
    root.insert("home".to_string(), Node::Dir(home));
    root.insert("usr".to_string(), Node::Dir(usr));
    root.insert("etc".to_string(), Node::Dir(etc));
    root.insert("tmp".to_string(), Node::dir());
    root.insert("var".to_string(), Node::Dir(var));
    Node::Dir(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_home() {
        let fs = VirtualFs::new();
        assert_eq!(fs.current_path(), HOME_DIR);
    }

    #[test]
    fn resolve_relative_and_special_paths() {
        let mut fs = VirtualFs::new();
        assert_eq!(fs.resolve_path("~"), HOME_DIR);
        assert_eq!(fs.resolve_path("."), HOME_DIR);
        assert_eq!(fs.resolve_path(".."), "/home");
        assert_eq!(fs.resolve_path("/etc"), "/etc");
        assert_eq!(fs.resolve_path("documents"), "/home/user/documents");
        fs.change_directory("/").unwrap();
        // `..` at the root stays at the root
        assert_eq!(fs.resolve_path(".."), "/");
    }

    #[test]
    fn change_directory_updates_and_validates() {
        let mut fs = VirtualFs::new();
        assert_eq!(fs.change_directory("documents").unwrap(), "/home/user/documents");
        assert_eq!(fs.current_path(), "/home/user/documents");
        assert_eq!(fs.change_directory("missing"), Err(VfsError::NotFound));
        assert_eq!(
            fs.change_directory("readme.txt"),
            Err(VfsError::NotADirectory)
        );
    }

    #[test]
    fn list_directory_reports_types_and_sizes() {
        let fs = VirtualFs::new();
        let entries = fs.list_directory("documents").unwrap();
        let readme = entries.iter().find(|e| e.name == "readme.txt").unwrap();
        assert!(!readme.is_dir);
        assert!(readme.size > 0);
        assert_eq!(fs.list_directory("documents/readme.txt"), Err(VfsError::NotADirectory));
    }

    #[test]
    fn read_write_roundtrip() {
        let mut fs = VirtualFs::new();
        fs.write_file("scratch.txt", "hello").unwrap();
        assert_eq!(fs.read_file("scratch.txt").unwrap(), "hello");
        // overwrite is allowed
        fs.write_file("scratch.txt", "bye").unwrap();
        assert_eq!(fs.read_file("scratch.txt").unwrap(), "bye");
        assert_eq!(fs.read_file("documents"), Err(VfsError::IsADirectory));
        assert_eq!(fs.read_file("nope"), Err(VfsError::NotFound));
        // writing over a directory is rejected
        assert_eq!(fs.write_file("documents", ""), Err(VfsError::IsADirectory));
    }

    #[test]
    fn create_directory_and_duplicates() {
        let mut fs = VirtualFs::new();
        fs.create_directory("projects").unwrap();
        assert!(fs.list_directory("projects").unwrap().is_empty());
        assert_eq!(fs.create_directory("projects"), Err(VfsError::AlreadyExists));
        assert_eq!(
            fs.create_directory("/missing/child"),
            Err(VfsError::NotFound)
        );
    }

    #[test]
    fn remove_files_and_directories() {
        let mut fs = VirtualFs::new();
        fs.write_file("junk.txt", "").unwrap();
        fs.remove("junk.txt").unwrap();
        assert_eq!(fs.read_file("junk.txt"), Err(VfsError::NotFound));
        assert_eq!(fs.remove("junk.txt"), Err(VfsError::NotFound));
        fs.remove("downloads").unwrap();
        assert_eq!(fs.change_directory("downloads"), Err(VfsError::NotFound));
    }
}
