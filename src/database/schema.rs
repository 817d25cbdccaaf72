pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL,
        password TEXT NOT NULL,
        email TEXT NOT NULL,
        admin INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS artists (
        id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL DEFAULT 'Unknown',
        last_name TEXT NOT NULL DEFAULT 'Unknown',
        artist_name TEXT,
        short_bio TEXT NOT NULL,
        long_bio TEXT,
        image_url TEXT,
        birth_country TEXT,
        birth_year INTEGER,
        death_year INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_artists_artist_name ON artists(artist_name);

    CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY,
        name TEXT UNIQUE NOT NULL,
        description TEXT,
        web INTEGER,
        \"order\" INTEGER
    );

    CREATE TABLE IF NOT EXISTS series (
        id INTEGER PRIMARY KEY,
        artist_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        FOREIGN KEY(artist_id) REFERENCES artists(id),
        UNIQUE(artist_id, name)
    );

    CREATE TABLE IF NOT EXISTS mediums (
        id INTEGER PRIMARY KEY,
        name TEXT UNIQUE NOT NULL
    );

    CREATE TABLE IF NOT EXISTS artworks (
        id INTEGER PRIMARY KEY,
        artist_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        size TEXT NOT NULL,
        year INTEGER,
        end_year INTEGER,
        image_url TEXT,
        hi_res_url TEXT,
        description TEXT,
        keywords TEXT,
        department INTEGER,
        series INTEGER,
        date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        price REAL,
        sold INTEGER NOT NULL DEFAULT 0 CHECK (sold IN (0, 1)),
        FOREIGN KEY(artist_id) REFERENCES artists(id),
        FOREIGN KEY(department) REFERENCES departments(id),
        FOREIGN KEY(series) REFERENCES series(id)
    );

    CREATE INDEX IF NOT EXISTS idx_artworks_identity ON artworks(title, year, artist_id);

    CREATE TABLE IF NOT EXISTS artworks_mediums (
        artwork_id INTEGER NOT NULL,
        medium_id INTEGER NOT NULL,
        FOREIGN KEY(artwork_id) REFERENCES artworks(id),
        FOREIGN KEY(medium_id) REFERENCES mediums(id),
        PRIMARY KEY(artwork_id, medium_id)
    );

    CREATE TABLE IF NOT EXISTS additional_images (
        id INTEGER PRIMARY KEY,
        artwork_id INTEGER NOT NULL,
        image_url TEXT NOT NULL,
        hi_res_url TEXT,
        FOREIGN KEY(artwork_id) REFERENCES artworks(id)
    );

    CREATE TABLE IF NOT EXISTS organizations (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        address_1 TEXT,
        address_2 TEXT,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        country TEXT NOT NULL DEFAULT 'United States',
        phone TEXT,
        email TEXT,
        type TEXT NOT NULL CHECK (type IN ('gallery', 'museum', 'collector', 'dealer', 'other'))
    );

    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT UNIQUE,
        phone TEXT,
        org INTEGER,
        note TEXT,
        type TEXT NOT NULL DEFAULT 'contact' CHECK (type IN ('contact', 'buyer', 'artist', 'staff')),
        FOREIGN KEY(org) REFERENCES organizations(id)
    );

    CREATE TABLE IF NOT EXISTS sold_artworks (
        id INTEGER PRIMARY KEY,
        artwork_id INTEGER NOT NULL,
        person_id INTEGER NOT NULL,
        org_id INTEGER,
        price REAL,
        date_sold TEXT DEFAULT CURRENT_TIMESTAMP,
        timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY(artwork_id) REFERENCES artworks(id),
        FOREIGN KEY(person_id) REFERENCES persons(id),
        FOREIGN KEY(org_id) REFERENCES organizations(id)
    );
";
