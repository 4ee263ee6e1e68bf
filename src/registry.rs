//! Built-in package catalog and config merging.

use crate::config::AppConfig;

/// A built-in package definition
struct BuiltinPackage {
    id: &'static str,
    executable: &'static str,
    install: &'static str,
    upgrade: &'static str,
    source: &'static str,
}

/// Packages known out of the box. Install and upgrade commands run
/// through the shell verbatim, fallback chains included.
const PACKAGES: &[BuiltinPackage] = &[
    BuiltinPackage {
        id: "lazygit",
        executable: "lazygit",
        install: "brew install lazygit",
        upgrade: "brew upgrade lazygit",
        source: "brew",
    },
    BuiltinPackage {
        id: "crush",
        executable: "crush",
        install: "brew install charmbracelet/tap/crush",
        upgrade: "brew upgrade charmbracelet/tap/crush",
        source: "brew",
    },
    BuiltinPackage {
        id: "qwen",
        executable: "qwen",
        install: "pnpm add -g @qwen-code/qwen-code",
        upgrade: "pnpm upgrade -g @qwen-code/qwen-code",
        source: "pnpm",
    },
    BuiltinPackage {
        id: "gemini",
        executable: "gemini",
        install: "pnpm add -g @google/gemini-cli",
        upgrade: "pnpm upgrade -g @google/gemini-cli",
        source: "pnpm",
    },
    BuiltinPackage {
        id: "codex",
        executable: "codex",
        install: "pnpm add -g @openai/codex",
        upgrade: "pnpm upgrade -g @openai/codex",
        source: "pnpm",
    },
    BuiltinPackage {
        id: "claude",
        executable: "claude",
        install: "pnpm add -g @anthropic-ai/claude-code",
        upgrade: "pnpm upgrade -g @anthropic-ai/claude-code",
        source: "pnpm",
    },
    BuiltinPackage {
        id: "opencode",
        executable: "opencode",
        install: "brew install anomalyco/tap/opencode",
        upgrade: "brew upgrade anomalyco/tap/opencode",
        source: "brew",
    },
    BuiltinPackage {
        id: "starship",
        executable: "starship",
        install: "curl -sS https://starship.rs/install.sh | sh",
        upgrade: "brew upgrade starship 2>/dev/null || curl -sS https://starship.rs/install.sh | sh",
        source: "shell",
    },
    BuiltinPackage {
        id: "bat",
        executable: "bat",
        install: "(set -e; cd /tmp; curl -sSL -o bat.deb https://github.com/sharkdp/bat/releases/download/v0.22.1/bat-musl_0.22.1_amd64.deb; sudo dpkg -i bat.deb; rm bat.deb)",
        upgrade: "brew upgrade bat 2>/dev/null || (set -e; cd /tmp; curl -sSL -o bat.deb https://github.com/sharkdp/bat/releases/download/v0.22.1/bat-musl_0.22.1_amd64.deb; sudo dpkg -i bat.deb; rm bat.deb)",
        source: "shell",
    },
    BuiltinPackage {
        id: "csvtk",
        executable: "csvtk",
        install: "curl -sSL -o - https://github.com/shenwei356/csvtk/releases/download/v0.25.0/csvtk_linux_amd64.tar.gz | sudo tar -xz --directory=/usr/local/bin",
        upgrade: "curl -sSL -o - https://github.com/shenwei356/csvtk/releases/download/v0.25.0/csvtk_linux_amd64.tar.gz | sudo tar -xz --directory=/usr/local/bin",
        source: "shell",
    },
    BuiltinPackage {
        id: "diff-so-fancy",
        executable: "diff-so-fancy",
        install: r#"sudo add-apt-repository -y ppa:aos1/diff-so-fancy && sudo apt update && sudo apt install diff-so-fancy && git config --global core.pager "diff-so-fancy | less --tabs=4 -RF" && git config --global interactive.diffFilter "diff-so-fancy --patch""#,
        upgrade: "apt upgrade diff-so-fancy 2>/dev/null || sudo add-apt-repository -y ppa:aos1/diff-so-fancy && sudo apt update && sudo apt install diff-so-fancy",
        source: "apt",
    },
    BuiltinPackage {
        id: "docker",
        executable: "docker",
        install: "curl -sSL https://get.docker.com/ | sudo sh",
        upgrade: "apt upgrade docker-ce 2>/dev/null || brew upgrade docker 2>/dev/null || curl -sSL https://get.docker.com/ | sudo sh",
        source: "shell",
    },
    BuiltinPackage {
        id: "fd",
        executable: "fd",
        install: "(set -e; cd /tmp; curl -sSL -o fd.deb https://github.com/sharkdp/fd/releases/download/v8.4.0/fd-musl_8.4.0_amd64.deb; sudo dpkg -i fd.deb; rm fd.deb)",
        upgrade: "brew upgrade fd 2>/dev/null || (set -e; cd /tmp; curl -sSL -o fd.deb https://github.com/sharkdp/fd/releases/download/v8.4.0/fd-musl_8.4.0_amd64.deb; sudo dpkg -i fd.deb; rm fd.deb)",
        source: "shell",
    },
    BuiltinPackage {
        id: "fly",
        executable: "flyctl",
        install: "curl -L https://fly.io/install.sh | sh",
        upgrade: "brew upgrade flyctl 2>/dev/null || curl -L https://fly.io/install.sh | sh",
        source: "shell",
    },
    BuiltinPackage {
        id: "fzf",
        executable: "fzf",
        install: "(set -e; cd; git clone https://github.com/junegunn/fzf.git .fzf; cd .fzf; ./install)",
        upgrade: "brew upgrade fzf 2>/dev/null || (cd ~/.fzf && git pull && ./install)",
        source: "shell",
    },
    BuiltinPackage {
        id: "gvm",
        executable: "gvm",
        install: "bash < <(curl -s -S -L https://raw.githubusercontent.com/moovweb/gvm/master/binscripts/gvm-installer)",
        upgrade: "gvm install go1.21 2>/dev/null || echo 'GVM upgrade requires manual intervention'",
        source: "shell",
    },
    BuiltinPackage {
        id: "hey",
        executable: "hey",
        install: "(set -e; mkdir -p $HOME/bin; curl -sSL -o $HOME/bin/hey https://hey-release.s3.us-east-2.amazonaws.com/hey_linux_amd64; chmod +x $HOME/bin/hey)",
        upgrade: "(set -e; mkdir -p $HOME/bin; curl -sSL -o $HOME/bin/hey https://hey-release.s3.us-east-2.amazonaws.com/hey_linux_amd64; chmod +x $HOME/bin/hey)",
        source: "shell",
    },
    BuiltinPackage {
        id: "icdiff",
        executable: "icdiff",
        install: "(set -e; mkdir -p $HOME/bin; curl -sSL -o $HOME/bin/icdiff https://raw.githubusercontent.com/jeffkaufman/icdiff/master/icdiff; curl -sSL -o $HOME/bin/git-icdiff https://raw.githubusercontent.com/jeffkaufman/icdiff/master/git-icdiff; chmod +x $HOME/bin/{icdiff,git-icdiff})",
        upgrade: "(set -e; mkdir -p $HOME/bin; curl -sSL -o $HOME/bin/icdiff https://raw.githubusercontent.com/jeffkaufman/icdiff/master/icdiff; curl -sSL -o $HOME/bin/git-icdiff https://raw.githubusercontent.com/jeffkaufman/icdiff/master/git-icdiff; chmod +x $HOME/bin/{icdiff,git-icdiff})",
        source: "shell",
    },
    BuiltinPackage {
        id: "pnpm",
        executable: "pnpm",
        install: "curl -fsSL https://get.pnpm.io/install.sh | sh -",
        upgrade: "pnpm self-update",
        source: "shell",
    },
    BuiltinPackage {
        id: "lsd",
        executable: "lsd",
        install: "(set -e; curl -sSL -o lsd.deb https://github.com/Peltoche/lsd/releases/download/0.23.1/lsd_0.23.1_amd64.deb; sudo dpkg -i lsd.deb; rm lsd.deb)",
        upgrade: "brew upgrade lsd 2>/dev/null || (set -e; curl -sSL -o lsd.deb https://github.com/Peltoche/lsd/releases/download/0.23.1/lsd_0.23.1_amd64.deb; sudo dpkg -i lsd.deb; rm lsd.deb)",
        source: "shell",
    },
    BuiltinPackage {
        id: "exa",
        executable: "exa",
        install: "apt install exa 2>/dev/null || brew install exa",
        upgrade: "apt upgrade exa 2>/dev/null || brew upgrade exa",
        source: "apt",
    },
    BuiltinPackage {
        id: "ripgrep",
        executable: "rg",
        install: "apt install ripgrep 2>/dev/null || brew install ripgrep",
        upgrade: "apt upgrade ripgrep 2>/dev/null || brew upgrade ripgrep",
        source: "apt",
    },
    BuiltinPackage {
        id: "fzf-alt",
        executable: "fzf",
        install: "apt install fzf 2>/dev/null || brew install fzf",
        upgrade: "apt upgrade fzf 2>/dev/null || brew upgrade fzf",
        source: "apt",
    },
    BuiltinPackage {
        id: "tmux",
        executable: "tmux",
        install: "apt install tmux 2>/dev/null || brew install tmux",
        upgrade: "apt upgrade tmux 2>/dev/null || brew upgrade tmux",
        source: "apt",
    },
    BuiltinPackage {
        id: "neovim",
        executable: "nvim",
        install: "apt install neovim 2>/dev/null || brew install neovim",
        upgrade: "apt upgrade neovim 2>/dev/null || brew upgrade neovim",
        source: "apt",
    },
    BuiltinPackage {
        id: "teleport",
        executable: "tsh",
        install: "(set -e; version=$(curl https://tele.ops.shipstream.io/webapi/automaticupgrades/channel/stable/cloud/version); curl https://cdn.teleport.dev/install-v16.4.0.sh | bash -s ${version:1} oss)",
        upgrade: "(set -e; version=$(curl https://tele.ops.shipstream.io/webapi/automaticupgrades/channel/stable/cloud/version); curl https://cdn.teleport.dev/install-v16.4.0.sh | bash -s ${version:1} oss)",
        source: "shell",
    },
];

/// A resolved package entry, builtin or user-defined.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    /// Name the user refers to the package by.
    pub id: String,
    /// Executable probed on the search path. May differ from the id
    /// (e.g. ripgrep ships `rg`).
    pub executable: String,
    pub install: String,
    pub upgrade: String,
    /// Display-only source tag (brew, pnpm, apt, shell, custom).
    pub source: String,
}

/// The set of packages this tool manages, in definition order.
#[derive(Debug, Clone)]
pub struct Registry {
    packages: Vec<PackageDescriptor>,
}

impl Registry {
    /// Registry with only the built-in packages.
    pub fn builtin() -> Self {
        let packages = PACKAGES
            .iter()
            .map(|p| PackageDescriptor {
                id: p.id.to_string(),
                executable: p.executable.to_string(),
                install: p.install.to_string(),
                upgrade: p.upgrade.to_string(),
                source: p.source.to_string(),
            })
            .collect();

        Self { packages }
    }

    /// Built-in registry with the config's packages merged over it.
    /// A config entry whose id matches a built-in replaces it in place,
    /// everything else is appended.
    pub fn with_config(config: &AppConfig) -> Self {
        let mut registry = Self::builtin();

        for (id, spec) in &config.packages {
            let descriptor = PackageDescriptor {
                id: id.clone(),
                executable: spec.executable.clone().unwrap_or_else(|| id.clone()),
                install: spec.install.clone(),
                upgrade: spec.upgrade.clone(),
                source: spec.source.clone(),
            };

            match registry.packages.iter_mut().find(|p| p.id == *id) {
                Some(existing) => *existing = descriptor,
                None => registry.packages.push(descriptor),
            }
        }

        registry
    }

    pub fn get(&self, id: &str) -> Option<&PackageDescriptor> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.packages.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
