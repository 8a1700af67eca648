#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// The three-row acceptance dataset: one fully populated cafe, one hotel
/// without route tags, and one nameless row kept alive by its coordinates.
pub fn sample_dataset_csv() -> &'static str {
    concat!(
        "nombre_normalizado,tipo,calificacion,num_opiniones,situacion_caminos_de_santiago,caracteristicas,ciudad,Latitud,Longitud,facebook_urls,instagram_urls\n",
        "Café Uno,Cafetería,\"4,5/5\",120 opiniones,Portugués,\"wifi, terraza\",Pontevedra,\"42,43\",\"-8,64\",,\n",
        "Hotel Dos,Hotel,\"3,0/5\",5,,parking,Pontevedra,,,https://facebook.com/hoteldos,\n",
        ",,,,,,,\"42,1\",\"-8,6\",,\n",
    )
}

/// A wider dataset exercising the misspelled geo headers and unparseable
/// numerics.
pub fn messy_dataset_csv() -> &'static str {
    concat!(
        "nombre_normalizado,tipo,calificacion,num_opiniones,situacion_caminos_de_santiago,Latitu,Longitu\n",
        "Albergue Peregrino,Albergue,\"4,0/5\",\"1.234 opiniones\",Portugués | Espiritual,\"42,52\",\"-8,81\"\n",
        "Ermita del Monte,Monumento,sin datos,sin opiniones,Portugués,\"42,40\",\"-8,75\"\n",
        ",,,,,,\n",
    )
}
