//! Frozen sample entities for tests.
//!
//! Each sample is a process-wide immutable static: tests read it through a
//! shared reference and must clone it to get a value they can change, so one
//! test can never alter the data another test sees.
//!
//! Available to other crates with the `test-fixtures` feature.

use chrono::NaiveDate;

fn sample_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 16).expect("valid sample date")
}

pub mod aluno {
    use super::sample_birth_date;
    use crate::domain::{Aluno, NewAluno};
    use std::sync::LazyLock;

    pub static SAMPLE_WITH_REQUIRED_DATA: LazyLock<Aluno> = LazyLock::new(|| Aluno {
        id: 8806,
        nome: "boo tomorrow".to_string(),
        email: "Genevieve_Weber15@yahoo.com".to_string(),
        data_nascimento: sample_birth_date(),
        telefone: None,
    });

    pub static SAMPLE_WITH_PARTIAL_DATA: LazyLock<Aluno> = LazyLock::new(|| Aluno {
        id: 22223,
        nome: "wetly".to_string(),
        email: "Sheila.Howe60@hotmail.com".to_string(),
        data_nascimento: sample_birth_date(),
        telefone: Some("tough whoa mould".to_string()),
    });

    pub static SAMPLE_WITH_FULL_DATA: LazyLock<Aluno> = LazyLock::new(|| Aluno {
        id: 25732,
        nome: "oof near likewise".to_string(),
        email: "Kaleb_Waters75@gmail.com".to_string(),
        data_nascimento: sample_birth_date(),
        telefone: Some("misfire".to_string()),
    });

    pub static SAMPLE_WITH_NEW_DATA: LazyLock<NewAluno> = LazyLock::new(|| NewAluno {
        id: None,
        nome: "energetically yet webbed".to_string(),
        email: "Ebony_Mayer@hotmail.com".to_string(),
        data_nascimento: sample_birth_date(),
        telefone: None,
    });

    /// The three persisted samples, in required/partial/full order
    pub fn persisted() -> [&'static Aluno; 3] {
        [
            &*SAMPLE_WITH_REQUIRED_DATA,
            &*SAMPLE_WITH_PARTIAL_DATA,
            &*SAMPLE_WITH_FULL_DATA,
        ]
    }
}

pub mod meta {
    use crate::domain::{Area, Meta, NewMeta};
    use std::sync::LazyLock;

    pub static SAMPLE_WITH_REQUIRED_DATA: LazyLock<Meta> = LazyLock::new(|| Meta {
        id: 17187,
        valor: 350,
        area: Area::Humanas,
        descricao: None,
        aluno: None,
    });

    pub static SAMPLE_WITH_PARTIAL_DATA: LazyLock<Meta> = LazyLock::new(|| Meta {
        id: 24285,
        valor: 443,
        area: Area::Natureza,
        descricao: Some("seal tightly".to_string()),
        aluno: None,
    });

    pub static SAMPLE_WITH_FULL_DATA: LazyLock<Meta> = LazyLock::new(|| Meta {
        id: 32703,
        valor: 176,
        area: Area::Linguagens,
        descricao: Some("asset pace too".to_string()),
        aluno: None,
    });

    pub static SAMPLE_WITH_NEW_DATA: LazyLock<NewMeta> = LazyLock::new(|| NewMeta {
        id: None,
        valor: 497,
        area: Area::Matematica,
        descricao: None,
        aluno: None,
    });

    pub fn persisted() -> [&'static Meta; 3] {
        [
            &*SAMPLE_WITH_REQUIRED_DATA,
            &*SAMPLE_WITH_PARTIAL_DATA,
            &*SAMPLE_WITH_FULL_DATA,
        ]
    }
}
