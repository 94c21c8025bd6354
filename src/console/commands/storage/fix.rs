use crate::configuration::get_configuration;
use std::path::Path;

pub struct FixCommand {
    dir: Option<String>,
}

impl FixCommand {
    pub fn new(dir: Option<String>) -> Self {
        Self { dir }
    }
}

/// Creates the directory and gives it mode 0755 on unix.
pub fn fix_storage_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

impl crate::console::commands::CallableTrait for FixCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => get_configuration()?.certificates.storage_dir,
        };

        fix_storage_dir(Path::new(&dir))?;
        println!("certificate storage ready: {}", dir);

        Ok(())
    }
}
