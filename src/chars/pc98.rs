//! ## PC-88/98 single-byte character set
//!
//! Covers the 8-bit character generator shared by the PC-8001, PC-8801,
//! and PC-9801 families when no kanji ROM is in play.  Bytes with no
//! standard Unicode counterpart map into the private use area so that
//! byte -> code point -> byte is the identity on all 256 values.

pub const PC98_FORWARD: [char;256] = [
    '\u{2400}','\u{2401}','\u{2402}','\u{2403}','\u{2404}','\u{2405}','\u{2406}','\u{2407}',
    '\u{2408}','\u{2409}','\u{240A}','\u{240B}','\u{240C}','\u{240D}','\u{240E}','\u{240F}',
    '\u{2410}','\u{2411}','\u{2412}','\u{2413}','\u{2414}','\u{2415}','\u{2416}','\u{2417}',
    '\u{2418}','\u{2419}','\u{241A}','\u{241B}','\u{FFEB}','\u{FFE9}','\u{FFEA}','\u{FFEC}',
    '\u{0020}','\u{0021}','\u{0022}','\u{0023}','\u{0024}','\u{0025}','\u{0026}','\u{0027}',
    '\u{0028}','\u{0029}','\u{002A}','\u{002B}','\u{002C}','\u{002D}','\u{002E}','\u{002F}',
    '\u{0030}','\u{0031}','\u{0032}','\u{0033}','\u{0034}','\u{0035}','\u{0036}','\u{0037}',
    '\u{0038}','\u{0039}','\u{003A}','\u{003B}','\u{003C}','\u{003D}','\u{003E}','\u{003F}',
    '\u{0040}','\u{0041}','\u{0042}','\u{0043}','\u{0044}','\u{0045}','\u{0046}','\u{0047}',
    '\u{0048}','\u{0049}','\u{004A}','\u{004B}','\u{004C}','\u{004D}','\u{004E}','\u{004F}',
    '\u{0050}','\u{0051}','\u{0052}','\u{0053}','\u{0054}','\u{0055}','\u{0056}','\u{0057}',
    '\u{0058}','\u{0059}','\u{005A}','\u{005B}','\u{00A5}','\u{005D}','\u{005E}','\u{005F}',
    '\u{0060}','\u{0061}','\u{0062}','\u{0063}','\u{0064}','\u{0065}','\u{0066}','\u{0067}',
    '\u{0068}','\u{0069}','\u{006A}','\u{006B}','\u{006C}','\u{006D}','\u{006E}','\u{006F}',
    '\u{0070}','\u{0071}','\u{0072}','\u{0073}','\u{0074}','\u{0075}','\u{0076}','\u{0077}',
    '\u{0078}','\u{0079}','\u{007A}','\u{007B}','\u{00A6}','\u{007D}','\u{007E}','\u{2421}',
    '\u{2581}','\u{2582}','\u{2583}','\u{2584}','\u{2585}','\u{2586}','\u{2587}','\u{2588}',
    '\u{258F}','\u{258E}','\u{258D}','\u{258C}','\u{258B}','\u{258A}','\u{2589}','\u{253C}',
    '\u{2534}','\u{252C}','\u{2524}','\u{251C}','\u{2594}','\u{2500}','\u{2502}','\u{2595}',
    '\u{250C}','\u{2510}','\u{2514}','\u{2518}','\u{256D}','\u{256E}','\u{2570}','\u{256F}',
    '\u{F8F0}','\u{FF61}','\u{FF62}','\u{FF63}','\u{FF64}','\u{FF65}','\u{FF66}','\u{FF67}',
    '\u{FF68}','\u{FF69}','\u{FF6A}','\u{FF6B}','\u{FF6C}','\u{FF6D}','\u{FF6E}','\u{FF6F}',
    '\u{FF70}','\u{FF71}','\u{FF72}','\u{FF73}','\u{FF74}','\u{FF75}','\u{FF76}','\u{FF77}',
    '\u{FF78}','\u{FF79}','\u{FF7A}','\u{FF7B}','\u{FF7C}','\u{FF7D}','\u{FF7E}','\u{FF7F}',
    '\u{FF80}','\u{FF81}','\u{FF82}','\u{FF83}','\u{FF84}','\u{FF85}','\u{FF86}','\u{FF87}',
    '\u{FF88}','\u{FF89}','\u{FF8A}','\u{FF8B}','\u{FF8C}','\u{FF8D}','\u{FF8E}','\u{FF8F}',
    '\u{FF90}','\u{FF91}','\u{FF92}','\u{FF93}','\u{FF94}','\u{FF95}','\u{FF96}','\u{FF97}',
    '\u{FF98}','\u{FF99}','\u{FF9A}','\u{FF9B}','\u{FF9C}','\u{FF9D}','\u{FF9E}','\u{FF9F}',
    '\u{2550}','\u{255E}','\u{256A}','\u{2561}','\u{25E2}','\u{25E3}','\u{25E5}','\u{25E4}',
    '\u{2660}','\u{2665}','\u{2666}','\u{2663}','\u{2022}','\u{FFEE}','\u{2571}','\u{2572}',
    '\u{2573}','\u{5186}','\u{5E74}','\u{6708}','\u{65E5}','\u{6642}','\u{5206}','\u{79D2}',
    '\u{F8F4}','\u{F8F5}','\u{F8F6}','\u{F8F7}','\u{005C}','\u{F8F1}','\u{F8F2}','\u{F8F3}',
];

pub const PC98_REVERSE: [(char,u8);256] = [
    ('\u{0020}',0x20),('\u{0021}',0x21),('\u{0022}',0x22),('\u{0023}',0x23),('\u{0024}',0x24),('\u{0025}',0x25),('\u{0026}',0x26),('\u{0027}',0x27),
    ('\u{0028}',0x28),('\u{0029}',0x29),('\u{002A}',0x2A),('\u{002B}',0x2B),('\u{002C}',0x2C),('\u{002D}',0x2D),('\u{002E}',0x2E),('\u{002F}',0x2F),
    ('\u{0030}',0x30),('\u{0031}',0x31),('\u{0032}',0x32),('\u{0033}',0x33),('\u{0034}',0x34),('\u{0035}',0x35),('\u{0036}',0x36),('\u{0037}',0x37),
    ('\u{0038}',0x38),('\u{0039}',0x39),('\u{003A}',0x3A),('\u{003B}',0x3B),('\u{003C}',0x3C),('\u{003D}',0x3D),('\u{003E}',0x3E),('\u{003F}',0x3F),
    ('\u{0040}',0x40),('\u{0041}',0x41),('\u{0042}',0x42),('\u{0043}',0x43),('\u{0044}',0x44),('\u{0045}',0x45),('\u{0046}',0x46),('\u{0047}',0x47),
    ('\u{0048}',0x48),('\u{0049}',0x49),('\u{004A}',0x4A),('\u{004B}',0x4B),('\u{004C}',0x4C),('\u{004D}',0x4D),('\u{004E}',0x4E),('\u{004F}',0x4F),
    ('\u{0050}',0x50),('\u{0051}',0x51),('\u{0052}',0x52),('\u{0053}',0x53),('\u{0054}',0x54),('\u{0055}',0x55),('\u{0056}',0x56),('\u{0057}',0x57),
    ('\u{0058}',0x58),('\u{0059}',0x59),('\u{005A}',0x5A),('\u{005B}',0x5B),('\u{005C}',0xFC),('\u{005D}',0x5D),('\u{005E}',0x5E),('\u{005F}',0x5F),
    ('\u{0060}',0x60),('\u{0061}',0x61),('\u{0062}',0x62),('\u{0063}',0x63),('\u{0064}',0x64),('\u{0065}',0x65),('\u{0066}',0x66),('\u{0067}',0x67),
    ('\u{0068}',0x68),('\u{0069}',0x69),('\u{006A}',0x6A),('\u{006B}',0x6B),('\u{006C}',0x6C),('\u{006D}',0x6D),('\u{006E}',0x6E),('\u{006F}',0x6F),
    ('\u{0070}',0x70),('\u{0071}',0x71),('\u{0072}',0x72),('\u{0073}',0x73),('\u{0074}',0x74),('\u{0075}',0x75),('\u{0076}',0x76),('\u{0077}',0x77),
    ('\u{0078}',0x78),('\u{0079}',0x79),('\u{007A}',0x7A),('\u{007B}',0x7B),('\u{007D}',0x7D),('\u{007E}',0x7E),('\u{00A5}',0x5C),('\u{00A6}',0x7C),
    ('\u{2022}',0xEC),('\u{2400}',0x00),('\u{2401}',0x01),('\u{2402}',0x02),('\u{2403}',0x03),('\u{2404}',0x04),('\u{2405}',0x05),('\u{2406}',0x06),
    ('\u{2407}',0x07),('\u{2408}',0x08),('\u{2409}',0x09),('\u{240A}',0x0A),('\u{240B}',0x0B),('\u{240C}',0x0C),('\u{240D}',0x0D),('\u{240E}',0x0E),
    ('\u{240F}',0x0F),('\u{2410}',0x10),('\u{2411}',0x11),('\u{2412}',0x12),('\u{2413}',0x13),('\u{2414}',0x14),('\u{2415}',0x15),('\u{2416}',0x16),
    ('\u{2417}',0x17),('\u{2418}',0x18),('\u{2419}',0x19),('\u{241A}',0x1A),('\u{241B}',0x1B),('\u{2421}',0x7F),('\u{2500}',0x95),('\u{2502}',0x96),
    ('\u{250C}',0x98),('\u{2510}',0x99),('\u{2514}',0x9A),('\u{2518}',0x9B),('\u{251C}',0x93),('\u{2524}',0x92),('\u{252C}',0x91),('\u{2534}',0x90),
    ('\u{253C}',0x8F),('\u{2550}',0xE0),('\u{255E}',0xE1),('\u{2561}',0xE3),('\u{256A}',0xE2),('\u{256D}',0x9C),('\u{256E}',0x9D),('\u{256F}',0x9F),
    ('\u{2570}',0x9E),('\u{2571}',0xEE),('\u{2572}',0xEF),('\u{2573}',0xF0),('\u{2581}',0x80),('\u{2582}',0x81),('\u{2583}',0x82),('\u{2584}',0x83),
    ('\u{2585}',0x84),('\u{2586}',0x85),('\u{2587}',0x86),('\u{2588}',0x87),('\u{2589}',0x8E),('\u{258A}',0x8D),('\u{258B}',0x8C),('\u{258C}',0x8B),
    ('\u{258D}',0x8A),('\u{258E}',0x89),('\u{258F}',0x88),('\u{2594}',0x94),('\u{2595}',0x97),('\u{25E2}',0xE4),('\u{25E3}',0xE5),('\u{25E4}',0xE7),
    ('\u{25E5}',0xE6),('\u{2660}',0xE8),('\u{2663}',0xEB),('\u{2665}',0xE9),('\u{2666}',0xEA),('\u{5186}',0xF1),('\u{5206}',0xF6),('\u{5E74}',0xF2),
    ('\u{65E5}',0xF4),('\u{6642}',0xF5),('\u{6708}',0xF3),('\u{79D2}',0xF7),('\u{F8F0}',0xA0),('\u{F8F1}',0xFD),('\u{F8F2}',0xFE),('\u{F8F3}',0xFF),
    ('\u{F8F4}',0xF8),('\u{F8F5}',0xF9),('\u{F8F6}',0xFA),('\u{F8F7}',0xFB),('\u{FF61}',0xA1),('\u{FF62}',0xA2),('\u{FF63}',0xA3),('\u{FF64}',0xA4),
    ('\u{FF65}',0xA5),('\u{FF66}',0xA6),('\u{FF67}',0xA7),('\u{FF68}',0xA8),('\u{FF69}',0xA9),('\u{FF6A}',0xAA),('\u{FF6B}',0xAB),('\u{FF6C}',0xAC),
    ('\u{FF6D}',0xAD),('\u{FF6E}',0xAE),('\u{FF6F}',0xAF),('\u{FF70}',0xB0),('\u{FF71}',0xB1),('\u{FF72}',0xB2),('\u{FF73}',0xB3),('\u{FF74}',0xB4),
    ('\u{FF75}',0xB5),('\u{FF76}',0xB6),('\u{FF77}',0xB7),('\u{FF78}',0xB8),('\u{FF79}',0xB9),('\u{FF7A}',0xBA),('\u{FF7B}',0xBB),('\u{FF7C}',0xBC),
    ('\u{FF7D}',0xBD),('\u{FF7E}',0xBE),('\u{FF7F}',0xBF),('\u{FF80}',0xC0),('\u{FF81}',0xC1),('\u{FF82}',0xC2),('\u{FF83}',0xC3),('\u{FF84}',0xC4),
    ('\u{FF85}',0xC5),('\u{FF86}',0xC6),('\u{FF87}',0xC7),('\u{FF88}',0xC8),('\u{FF89}',0xC9),('\u{FF8A}',0xCA),('\u{FF8B}',0xCB),('\u{FF8C}',0xCC),
    ('\u{FF8D}',0xCD),('\u{FF8E}',0xCE),('\u{FF8F}',0xCF),('\u{FF90}',0xD0),('\u{FF91}',0xD1),('\u{FF92}',0xD2),('\u{FF93}',0xD3),('\u{FF94}',0xD4),
    ('\u{FF95}',0xD5),('\u{FF96}',0xD6),('\u{FF97}',0xD7),('\u{FF98}',0xD8),('\u{FF99}',0xD9),('\u{FF9A}',0xDA),('\u{FF9B}',0xDB),('\u{FF9C}',0xDC),
    ('\u{FF9D}',0xDD),('\u{FF9E}',0xDE),('\u{FF9F}',0xDF),('\u{FFE9}',0x1D),('\u{FFEA}',0x1E),('\u{FFEB}',0x1C),('\u{FFEC}',0x1F),('\u{FFEE}',0xED),
];
