//! Demo content for the portfolio terminal.

use crate::tree::{Node, VirtualFs};

/// Build the default portfolio tree browsed with `ls`, `cd` and `cat`.
pub fn demo_tree() -> VirtualFs {
    VirtualFs::new(Node::dir([
        (
            "readme.txt",
            Node::file(
                "Welcome to Terminal-D!<br>\
                 Use `ls` to look around, `cd` to move and `cat` to read files.",
            ),
        ),
        (
            "contact.txt",
            Node::file(
                "Email: <a href=\"mailto:hello@terminal-d.dev\">hello@terminal-d.dev</a><br>\
                 GitHub: <a href=\"https://github.com/dewaldbreed\" target=\"_blank\">dewaldbreed</a>",
            ),
        ),
        (
            "projects",
            Node::dir([
                (
                    "terminal-d.md",
                    Node::file(
                        "Terminal-D<br>\
                         A terminal themed portfolio with themes, accounts and a virtual file system.",
                    ),
                ),
                (
                    "weather.md",
                    Node::file("Weather<br>A small forecast dashboard backed by a public API."),
                ),
                (
                    "archive",
                    Node::dir([(
                        "first-site.txt",
                        Node::file("My very first website. Tables everywhere."),
                    )]),
                ),
            ]),
        ),
        (
            "skills",
            Node::dir([
                ("frontend.txt", Node::file("TypeScript, React, styled-components")),
                ("backend.txt", Node::file("Node.js, Express, PostgreSQL")),
            ]),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VfsPath;

    #[test]
    fn root_has_expected_entries() {
        let vfs = demo_tree();
        let names = vfs.list(&VfsPath::root(), "~").unwrap();
        assert_eq!(names, vec!["contact.txt", "projects", "readme.txt", "skills"]);
    }

    #[test]
    fn nested_file_is_readable() {
        let vfs = demo_tree();
        let path = VfsPath::root().resolve("projects/archive/first-site.txt");
        assert!(vfs.read(&path, "first-site.txt").unwrap().contains("first website"));
    }
}
