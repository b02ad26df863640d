//! doxyindex - Doxygen tag file to docset search index converter
//!
//! Reads the XML tag file Doxygen emits, classifies every documented symbol
//! into a docset entry category and writes the result into the SQLite
//! `searchIndex` table that Dash, Zeal and helm-dash browse.

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod migrations;
pub mod models;
pub mod plist;
pub mod services;
pub mod tagfile;
