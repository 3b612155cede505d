use anyhow::{Result, bail};

use super::{DriveClient, ROOT_FOLDER};
use crate::profile::ProfileManager;

/// project-context drive ls [FOLDER_ID] [--name FOLDER_NAME]
pub fn run(manager: &ProfileManager, folder_id: Option<&str>, name: Option<&str>) -> Result<()> {
    let token = crate::auth::bootstrapper_for(manager)?.credentials()?;
    let client = DriveClient::new(&token.token);

    let folder_id = match (folder_id, name) {
        (Some(_), Some(_)) => bail!("Pass either a folder ID or --name, not both"),
        (Some(id), None) => id.to_string(),
        (None, Some(name)) => match client.find_folder(name)? {
            Some(folder) => folder.id,
            None => bail!("No folder named '{}' in My Drive", name),
        },
        (None, None) => ROOT_FOLDER.to_string(),
    };

    let files = client.list_folder(&folder_id)?;
    println!("{} entries in '{}':", files.len(), folder_id);
    for file in &files {
        let kind = if file.is_folder() { "folder" } else { "file" };
        println!(
            "  [{:<6}] {}  (id: {}, modified: {})",
            kind, file.name, file.id, file.modified_time
        );
    }
    Ok(())
}
