// This file is part of combine_galil_code.
//
// Developed for the Vera Rubin Observatory Systems.
// This product includes software developed by the LSST Project
// (https://www.lsst.org).
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Galil Code Combiner
//!
//! This library combines the Galil source code files of a mirror controller
//! device into a single file that can be uploaded to the Galil, and checks
//! the combined code against the limits of the Galil firmware loader.
pub mod application;
pub mod combiner;
pub mod config;
pub mod constants;
pub mod enums;
pub mod source_file;
pub mod utility;
pub mod validator;
