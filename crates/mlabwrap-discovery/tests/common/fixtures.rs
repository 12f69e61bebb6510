//! Canned query output

#![allow(dead_code)]

/// Linux release with a one-line banner
pub const R2013A_LINUX_OUTPUT: &str = "Banner line\n8.1 (R2013a)\nGLNXA64\n";

/// Full startup banner followed by the query lines
pub const R2007B_BANNER_OUTPUT: &str = "
                              < M A T L A B >
                  Copyright 1984-2007 The MathWorks, Inc.
                         Version 7.5.0.342 (R2007b)
                              August 9, 2007

7.5.0.342 (R2007b)
GLNXA64
";

/// Windows log file content, CRLF line endings
pub const R2012A_WINDOWS_LOG: &str = "7.14.0.739 (R2012a)\r\nPCWIN64\r\n";

/// Query output whose last line has no architecture code
pub const UNKNOWN_ARCH_OUTPUT: &str = "Banner line\n8.1 (R2013a)\nSOL64\n";

/// Linux installation root used by the fixtures
pub const LINUX_ROOT: &str = "/usr/local/MATLAB/R2013a";

/// Windows installation root used by the fixtures
pub const WINDOWS_ROOT: &str = r"C:\Program Files\MATLAB\R2012a";
